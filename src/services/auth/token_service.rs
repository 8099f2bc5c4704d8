//! JWT 토큰 관리 서비스 구현
//!
//! 신원 ID를 서명된 세션 토큰으로 만들고, 토큰을 다시 신원 ID로 검증합니다.
//! 토큰과 신원 사이의 유일한 신뢰 경계입니다.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use thiserror::Error;

use crate::config::JwtSettings;
use crate::core::errors::AppError;
use crate::domain::models::token::{TokenClaims, VerifiedToken};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    /// 서명 불일치, 알고리즘 불일치, 만료, 잘못된 페이로드
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidToken(msg) => AppError::auth_failed(msg),
            TokenError::Signing(msg) => AppError::InternalError(msg),
        }
    }
}

pub struct TokenService {
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(settings: JwtSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());

        Self { settings, encoding_key, decoding_key }
    }

    /// 신원 ID에 대한 토큰 발급
    ///
    /// 클레임: `{ data: identity_id, iat, exp = iat + expire_seconds }`
    pub fn sign(&self, identity_id: &str) -> Result<String, TokenError> {
        self.sign_at(identity_id, Utc::now().timestamp())
    }

    pub(crate) fn sign_at(&self, identity_id: &str, issued_at: i64) -> Result<String, TokenError> {
        let claims = TokenClaims {
            data: identity_id.to_string(),
            iat: issued_at,
            exp: issued_at + self.settings.expire_seconds,
        };

        encode(&Header::new(self.settings.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// 토큰 검증
    ///
    /// 설정된 알고리즘 이외의 서명은 거부합니다. 토큰은 `exp` 이전까지만 유효하며
    /// 유예 시간은 없습니다.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let mut validation = Validation::new(self.settings.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                debug!("토큰 검증 실패: {}", e);
                TokenError::InvalidToken(e.to_string())
            })?;

        // jsonwebtoken은 exp == now를 통과시킵니다
        if token_data.claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::InvalidToken("ExpiredSignature".to_string()));
        }

        Ok(VerifiedToken {
            identity_id: token_data.claims.data,
            issued_at: token_data.claims.iat,
        })
    }

    /// 토큰 유효 기간 (초)
    pub fn expires_in(&self) -> i64 {
        self.settings.expire_seconds
    }
}
