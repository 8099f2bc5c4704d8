pub mod registration_queue;

pub use registration_queue::*;
