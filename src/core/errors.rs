//! # Application Error Handling System
//!
//! 백엔드 서비스를 위한 통합 에러 처리 시스템입니다.
//! 각 컴포넌트는 HTTP 상태 코드를 직접 결정하지 않고, 의미 있는 실패 코드
//! ([`FailureCode`])만을 발생시킵니다. 실제 HTTP 상태와 응답 본문은
//! 데이터베이스에 저장된 에러 설명(ErrorDescription)을 조회하는
//! [`ErrorResolver`](crate::services::errors::ErrorResolver)가 결정합니다.
//!
//! ## 설계 철학
//!
//! ### 1. 실패 코드와 HTTP 상태의 분리
//! - **안정적인 코드 문자열**: `ERR_AUTH_FAILED`, `ERR_INVALID_JWT` 등
//! - **운영 중 변경 가능**: 상태 코드(401/400/500)는 DB에서 관리되므로
//!   배포 없이 심각도를 조정할 수 있습니다
//!
//! ### 2. 인프라 에러의 일반화
//! - **DatabaseError / ExternalServiceError / InternalError**: 모두
//!   `ERR_UNKNOWN` 코드로 수렴하며 내부 메시지는 클라이언트에게 노출되지 않습니다
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, FailureCode};
//!
//! async fn load(store: &dyn UserStore, id: &str) -> Result<User, AppError> {
//!     store
//!         .find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::auth_failed("사용자를 찾을 수 없습니다"))
//! }
//! ```

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 안정적인 실패 코드 분류
///
/// HTTP 상태와 무관한 심볼릭 코드입니다. 문자열 표현은 에러 설명 컬렉션의
/// `code` 필드와 정확히 일치해야 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureCode {
    #[serde(rename = "ERR_AUTH_FAILED")]
    AuthFailed,
    #[serde(rename = "ERR_INVALID_JWT")]
    InvalidJwt,
    #[serde(rename = "ERR_INVALID_PARMS")]
    InvalidParams,
    #[serde(rename = "ERR_USER_ALREADY_EXISTS")]
    UserAlreadyExists,
    #[serde(rename = "ERR_INCORRECT_PASSWORD_RESET_TOKEN")]
    IncorrectPasswordResetToken,
    #[serde(rename = "ERR_CATEGORY_NOT_FOUND")]
    CategoryNotFound,
    #[serde(rename = "ERR_DISTRICT_NOT_FOUND")]
    DistrictNotFound,
    #[serde(rename = "ERR_MERCHANT_NOT_FOUND")]
    MerchantNotFound,
    #[serde(rename = "ERR_ROOM_NOT_FOUND")]
    RoomNotFound,
    #[serde(rename = "ERR_AHEAD_RESERVED_DATE")]
    AheadReservedDate,
    #[serde(rename = "ERR_EXCEED_MAX_BOOKING_SESSION")]
    ExceedMaxBookingSession,
    #[serde(rename = "ERR_ROOM_IS_RESERVED")]
    RoomIsReserved,
    #[serde(rename = "ERR_CONSECUTIVE_BOOKING_NOT_ALLOWED")]
    ConsecutiveBookingNotAllowed,
    #[serde(rename = "ERR_INVALID_START_TIME_OR_END_TIME")]
    InvalidStartTimeOrEndTime,
    #[serde(rename = "ERR_TIMESLOT_NOT_FOUND")]
    TimeslotNotFound,
    #[serde(rename = "ERR_INVALID_PAYMENT_METHOD")]
    InvalidPaymentMethod,
    #[serde(rename = "ERR_CODE_NOT_PERSISTED_TO_DATABASE")]
    CodeNotPersisted,
    #[serde(rename = "ERR_UNKNOWN")]
    Unknown,
}

impl FailureCode {
    pub const ALL: [FailureCode; 18] = [
        FailureCode::AuthFailed,
        FailureCode::InvalidJwt,
        FailureCode::InvalidParams,
        FailureCode::UserAlreadyExists,
        FailureCode::IncorrectPasswordResetToken,
        FailureCode::CategoryNotFound,
        FailureCode::DistrictNotFound,
        FailureCode::MerchantNotFound,
        FailureCode::RoomNotFound,
        FailureCode::AheadReservedDate,
        FailureCode::ExceedMaxBookingSession,
        FailureCode::RoomIsReserved,
        FailureCode::ConsecutiveBookingNotAllowed,
        FailureCode::InvalidStartTimeOrEndTime,
        FailureCode::TimeslotNotFound,
        FailureCode::InvalidPaymentMethod,
        FailureCode::CodeNotPersisted,
        FailureCode::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCode::AuthFailed => "ERR_AUTH_FAILED",
            FailureCode::InvalidJwt => "ERR_INVALID_JWT",
            FailureCode::InvalidParams => "ERR_INVALID_PARMS",
            FailureCode::UserAlreadyExists => "ERR_USER_ALREADY_EXISTS",
            FailureCode::IncorrectPasswordResetToken => "ERR_INCORRECT_PASSWORD_RESET_TOKEN",
            FailureCode::CategoryNotFound => "ERR_CATEGORY_NOT_FOUND",
            FailureCode::DistrictNotFound => "ERR_DISTRICT_NOT_FOUND",
            FailureCode::MerchantNotFound => "ERR_MERCHANT_NOT_FOUND",
            FailureCode::RoomNotFound => "ERR_ROOM_NOT_FOUND",
            FailureCode::AheadReservedDate => "ERR_AHEAD_RESERVED_DATE",
            FailureCode::ExceedMaxBookingSession => "ERR_EXCEED_MAX_BOOKING_SESSION",
            FailureCode::RoomIsReserved => "ERR_ROOM_IS_RESERVED",
            FailureCode::ConsecutiveBookingNotAllowed => "ERR_CONSECUTIVE_BOOKING_NOT_ALLOWED",
            FailureCode::InvalidStartTimeOrEndTime => "ERR_INVALID_START_TIME_OR_END_TIME",
            FailureCode::TimeslotNotFound => "ERR_TIMESLOT_NOT_FOUND",
            FailureCode::InvalidPaymentMethod => "ERR_INVALID_PAYMENT_METHOD",
            FailureCode::CodeNotPersisted => "ERR_CODE_NOT_PERSISTED_TO_DATABASE",
            FailureCode::Unknown => "ERR_UNKNOWN",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailureCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FailureCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| format!("Unsupported failure code: {}", s))
    }
}

/// 애플리케이션 전역 에러 타입
///
/// `Failure`는 분류된 실패이며, 나머지 변형은 인프라 계층의 예기치 못한
/// 에러로 모두 [`FailureCode::Unknown`]으로 취급됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 분류된 실패 (코드 + 디버그용 상세 정보)
    #[error("{code}: {detail}")]
    Failure { code: FailureCode, detail: String },

    /// 데이터베이스 관련 에러
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 외부 서비스 에러 (OAuth 프로바이더 등)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn failure(code: FailureCode, detail: impl Into<String>) -> Self {
        AppError::Failure { code, detail: detail.into() }
    }

    pub fn auth_failed(detail: impl Into<String>) -> Self {
        Self::failure(FailureCode::AuthFailed, detail)
    }

    pub fn invalid_jwt(detail: impl Into<String>) -> Self {
        Self::failure(FailureCode::InvalidJwt, detail)
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::failure(FailureCode::InvalidParams, detail)
    }

    /// 이 에러가 해석될 실패 코드
    pub fn failure_code(&self) -> FailureCode {
        match self {
            AppError::Failure { code, .. } => *code,
            _ => FailureCode::Unknown,
        }
    }
}

impl actix_web::ResponseError for AppError {
    /// 에러 해석 미들웨어가 설치되지 않은 경우에만 사용되는 대체 응답입니다.
    ///
    /// 상태 코드는 항상 500이며, 실제 상태 결정은
    /// [`ErrorResolution`](crate::middlewares::ErrorResolution) 미들웨어가 담당합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::InternalServerError()
            .json(serde_json::json!({
                "code": self.failure_code().as_str()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_failure_code_string_roundtrip() {
        for code in FailureCode::ALL {
            assert_eq!(code.as_str().parse::<FailureCode>().unwrap(), code);
        }
        assert!("ERR_NOT_A_CODE".parse::<FailureCode>().is_err());
    }

    #[test]
    fn test_failure_code_serializes_as_wire_string() {
        let json = serde_json::to_string(&FailureCode::InvalidJwt).unwrap();
        assert_eq!(json, "\"ERR_INVALID_JWT\"");
    }

    #[test]
    fn test_infrastructure_errors_collapse_to_unknown() {
        assert_eq!(AppError::DatabaseError("down".into()).failure_code(), FailureCode::Unknown);
        assert_eq!(AppError::InternalError("boom".into()).failure_code(), FailureCode::Unknown);
        assert_eq!(AppError::auth_failed("nope").failure_code(), FailureCode::AuthFailed);
    }

    #[test]
    fn test_placeholder_response_is_internal_error() {
        let error = AppError::invalid_jwt("missing header");
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        assert!(app_result.is_err());
        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
