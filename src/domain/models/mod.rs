//! # Domain Models Module
//!
//! 영속화되지 않는 도메인 모델과 값 객체를 정의합니다.
//!
//! ```text
//! models/
//! ├── auth/    ← 인증된 사용자, 신원 검증 결과
//! ├── oauth/   ← 외부 프로바이더 프로필 (Facebook Graph API)
//! └── token/   ← JWT 클레임
//! ```

pub mod auth;
pub mod oauth;
pub mod token;
