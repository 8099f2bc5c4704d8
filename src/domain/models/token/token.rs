//! JWT 클레임 구조체
//!
//! 토큰에는 신원 ID 하나만 담습니다.
use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `data`: 신원 ID (저장소 기본 키의 16진 문자열)
/// - `iat`: 발급 시각 (Unix timestamp)
/// - `exp`: 만료 시각 (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub data: String,
    pub iat: i64,
    pub exp: i64,
}

/// 검증을 통과한 토큰에서 얻은 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub identity_id: String,
    pub issued_at: i64,
}
