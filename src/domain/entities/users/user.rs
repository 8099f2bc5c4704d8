//! User Entity Implementation
//!
//! 사용자(Identity) 엔티티의 핵심 구현체입니다.
//! 로컬 비밀번호 계정과 OAuth(Facebook/Google) 계정, 그리고 두 방식이 연결된
//! 계정을 하나의 모델로 표현합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;

/// 사용자 엔티티
///
/// ## 불변 조건
///
/// - 한 번이라도 인증된 계정은 `password_hash`, `facebook_id`, `google_id` 중
///   최소 하나를 가집니다
/// - `email`, `username`은 설정된 이후 전역적으로 유일합니다
/// - OAuth 전용 계정은 `email`이 없을 수 있습니다
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 로컬 회원가입 사용자 생성
    pub fn new_local(
        email: String,
        username: String,
        full_name: Option<String>,
        password_hash: String,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email: Some(email),
            username,
            password_hash: Some(password_hash),
            facebook_id: None,
            google_id: None,
            full_name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Facebook 토큰으로 가입한 사용자 생성 (비밀번호 없음)
    pub fn new_facebook(
        facebook_id: String,
        email: Option<String>,
        username: String,
        full_name: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            username,
            password_hash: None,
            facebook_id: Some(facebook_id),
            google_id: None,
            full_name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 계정에 연결된 인증 프로바이더 목록
    pub fn providers(&self) -> Vec<AuthProvider> {
        let mut providers = Vec::new();
        if self.password_hash.is_some() {
            providers.push(AuthProvider::Local);
        }
        if self.facebook_id.is_some() {
            providers.push(AuthProvider::Facebook);
        }
        if self.google_id.is_some() {
            providers.push(AuthProvider::Google);
        }
        providers
    }

    pub fn has_third_party_provider(&self) -> bool {
        self.providers().iter().any(|p| *p != AuthProvider::Local)
    }

    /// OAuth로 시작해 아직 비밀번호가 없는 계정인지 (로컬 가입 시 암묵적 연결 대상)
    pub fn is_linkable_by_password(&self) -> bool {
        self.facebook_id.is_some() && self.password_hash.is_none()
    }
}
