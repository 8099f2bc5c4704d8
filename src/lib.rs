//! 인증 게이트웨이 백엔드
//!
//! JWT 세션 토큰, 직렬화된 로컬 회원가입, Facebook 토큰 로그인,
//! 그리고 데이터베이스 기반 에러 카탈로그를 제공하는 인증 서비스입니다.
//!
//! # Features
//!
//! - **로컬 인증**: 이메일/비밀번호 로그인과 회원가입
//! - **Facebook 인증**: 클라이언트가 얻은 액세스 토큰으로 로그인/가입/계정 연결
//! - **JWT 세션**: `{data, iat, exp}` 클레임의 Bearer 토큰
//! - **회원가입 직렬화**: 단일 워커 큐로 동일 이메일 중복 생성 방지
//! - **에러 카탈로그**: 실패 코드 → HTTP 상태/설명을 MongoDB에서 조회
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │ ErrorResolution (outer) │ ← 실패 응답의 상태 코드 결정
//! └─────────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Routes + Auth  │ ← REST API, Bearer 토큰 검증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증, 토큰 발급
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 인증 전략, 회원가입 큐, 에러 해석
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore / ErrorDescriptionStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     MongoDB     │
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use auth_gateway_backend::config::JwtConfig;
//! use auth_gateway_backend::services::auth::TokenService;
//!
//! let tokens = TokenService::new(JwtConfig::settings()?);
//! let jwt = tokens.sign(&user_id)?;
//! assert_eq!(tokens.verify(&jwt)?.identity_id, user_id);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
