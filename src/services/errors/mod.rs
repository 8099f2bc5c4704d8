pub mod error_resolver;

pub use error_resolver::*;
