//! 사용자 관련 DTO 모듈
//!
//! HTTP 요청 본문/쿼리를 역직렬화하는 요청 DTO와
//! 클라이언트에게 반환되는 응답 DTO를 제공합니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
