//! 외부 OAuth 프로바이더 모델

pub mod facebook_profile;

pub use facebook_profile::*;
