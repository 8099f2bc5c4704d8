//! # Data Transfer Objects
//!
//! API 경계에서 사용되는 요청/응답 객체를 정의합니다.
//!
//! ```text
//! dto/
//! ├── users/
//! │   ├── request/   ← 로그인, 회원가입, Facebook 토큰 쿼리
//! │   └── response/  ← 사용자 프로필, 인증 응답
//! └── errors/        ← 에러 응답 본문
//! ```

pub mod users;
pub mod errors;
