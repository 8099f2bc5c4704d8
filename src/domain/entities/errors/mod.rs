//! Error Description Entity Module

pub mod error_description;
