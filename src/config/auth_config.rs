//! # Authentication Configuration Module
//!
//! JWT 세션 토큰과 OAuth 프로바이더(Facebook) 관련 설정을 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRE_SECONDS="86400"
//! export JWT_ALGORITHM="HS256"   # HS256 | HS384 | HS512
//! ```
//!
//! ### Facebook 설정
//! ```bash
//! export FACEBOOK_APP_ID="your-app-id"
//! export FACEBOOK_APP_SECRET="your-app-secret"
//! export FACEBOOK_GRAPH_URL="https://graph.facebook.com/v2.7"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::JwtConfig;
//!
//! let settings = JwtConfig::settings()?;
//! let token_service = TokenService::new(settings);
//! ```

use std::env;
use jsonwebtoken::Algorithm;

/// 토큰 서비스가 사용하는 확정된 JWT 설정값
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub algorithm: Algorithm,
    pub expire_seconds: i64,
}

pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    pub fn expire_seconds() -> i64 {
        env::var("JWT_EXPIRE_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400)
    }

    pub fn algorithm() -> Result<Algorithm, String> {
        let value = env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string());
        Self::parse_algorithm(&value)
    }

    /// 공유 시크릿으로 서명 가능한 HMAC 계열 알고리즘만 허용합니다.
    pub fn parse_algorithm(value: &str) -> Result<Algorithm, String> {
        match value.to_uppercase().as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            other => Err(format!("Unsupported JWT algorithm: {}", other)),
        }
    }

    pub fn settings() -> Result<JwtSettings, String> {
        Ok(JwtSettings {
            secret: Self::secret(),
            algorithm: Self::algorithm()?,
            expire_seconds: Self::expire_seconds(),
        })
    }
}

pub struct FacebookConfig;

impl FacebookConfig {
    pub fn app_id() -> String {
        env::var("FACEBOOK_APP_ID").unwrap_or_default()
    }

    pub fn app_secret() -> String {
        env::var("FACEBOOK_APP_SECRET").unwrap_or_default()
    }

    pub fn graph_url() -> String {
        env::var("FACEBOOK_GRAPH_URL")
            .unwrap_or_else(|_| "https://graph.facebook.com/v2.7".to_string())
    }
}

/// 계정에 연결될 수 있는 인증 프로바이더
#[derive(Debug, Clone, PartialEq)]
pub enum AuthProvider {
    Local,

    Google,

    Facebook,
}
