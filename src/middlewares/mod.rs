//! # HTTP 미들웨어
//!
//! - [`AuthMiddleware`] - Bearer 토큰 검증 및 사용자 로딩
//! - [`ErrorResolution`] - 실패 응답의 상태 코드/본문 결정

pub mod auth_middleware;
mod auth_inner;
pub mod error_resolution;

pub use auth_middleware::AuthMiddleware;
pub use error_resolution::ErrorResolution;
