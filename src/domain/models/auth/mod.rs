pub mod authenticated_user;
pub mod auth_outcome;

pub use authenticated_user::*;
pub use auth_outcome::*;
