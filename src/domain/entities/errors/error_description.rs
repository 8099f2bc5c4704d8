//! Error Description Entity
//!
//! 실패 코드 하나를 HTTP 상태와 사람이 읽을 수 있는 설명에 대응시키는 레코드입니다.
//! 운영자가 별도로 관리하며, 코어 로직에서는 읽기 전용입니다.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::core::errors::FailureCode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDescription {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 유일한 실패 코드 문자열 (예: `ERR_AUTH_FAILED`)
    pub code: String,
    /// 응답 HTTP 상태 코드
    pub status: u16,
    pub description: String,
}

impl ErrorDescription {
    pub fn new(code: FailureCode, status: u16, description: impl Into<String>) -> Self {
        Self {
            id: None,
            code: code.as_str().to_string(),
            status,
            description: description.into(),
        }
    }

    /// 새 배포 환경에서 시드로 사용하는 기본 에러 설명 목록
    ///
    /// 도메인 전용 코드(예약, 결제 등)는 해당 서비스가 직접 관리하므로 포함하지 않습니다.
    pub fn defaults() -> Vec<ErrorDescription> {
        vec![
            Self::new(FailureCode::AuthFailed, 401, "Authentication failed"),
            Self::new(FailureCode::InvalidJwt, 401, "Missing or malformed authorization header"),
            Self::new(FailureCode::InvalidParams, 400, "Invalid request parameters"),
            Self::new(FailureCode::UserAlreadyExists, 409, "An account with this email already exists"),
            Self::new(FailureCode::Unknown, 500, "Unexpected internal error"),
        ]
    }
}
