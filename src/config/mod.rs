//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리하며,
//! `.env.dev` / `.env.prod` 파일은 `main`에서 `PROFILE`에 따라 로드됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 환경, 등록 큐 관련 설정
//! - [`auth_config`] - JWT, Facebook OAuth 관련 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 환경 (development 에서만 에러 응답에 debug 필드가 포함됩니다)
//! export ENVIRONMENT="production"
//!
//! # JWT 설정
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRE_SECONDS="86400"
//!
//! # 보안 설정
//! export BCRYPT_COST="12"          # 4-15 범위
//!
//! # 등록 큐
//! export REGISTRATION_TIMEOUT_SECS="10"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
