//! bcrypt 비밀번호 해싱
//!
//! 해싱과 검증은 CPU 집약적이므로 actix 블로킹 스레드 풀에서 실행합니다.

use std::time::Instant;
use actix_web::web;
use log::debug;

use crate::config::PasswordConfig;
use crate::core::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// `PasswordConfig`의 환경별 cost 사용
    pub fn from_config() -> Self {
        Self::new(PasswordConfig::bcrypt_cost())
    }

    pub async fn hash(&self, password: &str) -> AppResult<String> {
        let cost = self.cost;
        let password = password.to_string();
        let started = Instant::now();

        let hashed = web::block(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::InternalError(format!("블로킹 작업 실패: {}", e)))?
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        debug!("Password hashing took: {:?} (cost={})", started.elapsed(), cost);
        Ok(hashed)
    }

    /// 저장된 해시와 비교합니다. 손상된 해시는 불일치로 취급합니다.
    pub async fn verify(&self, password: &str, password_hash: &str) -> AppResult<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();
        let started = Instant::now();

        let matched = web::block(move || bcrypt::verify(password, &password_hash).unwrap_or(false))
            .await
            .map_err(|e| AppError::InternalError(format!("블로킹 작업 실패: {}", e)))?;

        debug!("Password verification took: {:?}", started.elapsed());
        Ok(matched)
    }
}
