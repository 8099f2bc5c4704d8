//! # Domain Layer Module
//!
//! 인증 게이트웨이의 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - MongoDB에 저장되는 객체 (User, ErrorDescription)
//! ├── DTOs      - 요청/응답 계약
//! └── Models    - 영속화되지 않는 값 객체 (토큰 클레임, 검증 결과, OAuth 프로필)
//!      │
//!      ▼
//! Application Layer (Services, Middlewares)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! ## 식별자 규칙
//!
//! 클라이언트에게 노출되는 사용자 ID와 JWT의 `data` 클레임은 모두
//! 저장소 기본 키(`_id`)의 16진 문자열입니다. 사용자명은 식별자로 쓰지 않습니다.

pub mod entities;
pub mod dto;
pub mod models;
