//! 에러 응답 DTO
//!
//! 모든 실패 응답은 `{code, description, debug?}` 형태의 JSON 본문을 가집니다.

use serde::{Deserialize, Serialize};

/// 클라이언트에게 전달되는 에러 본문
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub description: String,
    /// 개발 환경 또는 코드 누락 시에만 포함되는 원본 실패 정보
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub debug: Option<String>,
}

/// HTTP 상태 코드와 본문의 쌍
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub status: u16,
    pub body: ErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_omitted_when_absent() {
        let body = ErrorBody {
            code: "ERR_AUTH_FAILED".into(),
            description: "Authentication failed".into(),
            debug: None,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["code"], "ERR_AUTH_FAILED");
        assert!(json.get("debug").is_none());
    }
}
