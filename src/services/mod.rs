//! # Service Layer
//!
//! 인증, 회원가입 직렬화, 에러 해석 비즈니스 로직을 담당합니다.

pub mod auth;
pub mod registration;
pub mod errors;
