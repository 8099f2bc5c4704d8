//! 인증 서비스 모듈
//!
//! - [`token_service`] - JWT 발급/검증
//! - [`password`] - bcrypt 해싱
//! - [`facebook_auth_service`] - Facebook Graph API 프로필 조회
//! - [`identity_verifier`] - 로그인/회원가입/Facebook 신원 검증 전략

pub mod token_service;
pub mod password;
pub mod facebook_auth_service;
pub mod identity_verifier;

pub use token_service::*;
pub use password::*;
pub use facebook_auth_service::*;
pub use identity_verifier::*;
