//! HTTP 핸들러

pub mod auth;
pub mod health;
