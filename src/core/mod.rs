//! # Core Module
//!
//! ### [`errors`] - 통합 에러 처리
//! - **FailureCode**: HTTP 상태와 무관한 안정적인 실패 코드
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **ErrorContext**: 외부 에러를 `AppError`로 변환하는 확장 trait
//!
//! ### [`state`] - 애플리케이션 상태
//! - **AppState**: `main`에서 조립되는 서비스 묶음

pub mod errors;
pub mod state;

pub use errors::*;
pub use state::*;
