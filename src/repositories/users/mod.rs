//! 사용자 저장소 추상화
//!
//! 서비스 계층은 [`UserStore`] trait에만 의존합니다. 운영 환경에서는
//! [`MongoUserRepository`], 테스트에서는 [`InMemoryUserRepository`]가 주입됩니다.

pub mod user_repo;
pub mod memory;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};

use crate::core::errors::AppResult;
use crate::domain::entities::users::user::User;

pub use memory::InMemoryUserRepository;
pub use user_repo::MongoUserRepository;

/// 사용자 단건 조회 조건
#[derive(Debug, Clone, PartialEq)]
pub enum UserCriteria {
    Id(ObjectId),
    Email(String),
    FacebookId(String),
    Username(String),
}

impl UserCriteria {
    pub fn to_filter(&self) -> Document {
        match self {
            UserCriteria::Id(id) => doc! { "_id": *id },
            UserCriteria::Email(email) => doc! { "email": email },
            UserCriteria::FacebookId(fb) => doc! { "facebook_id": fb },
            UserCriteria::Username(username) => doc! { "username": username },
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        match self {
            UserCriteria::Id(id) => user.id.as_ref() == Some(id),
            UserCriteria::Email(email) => user.email.as_deref() == Some(email.as_str()),
            UserCriteria::FacebookId(fb) => user.facebook_id.as_deref() == Some(fb.as_str()),
            UserCriteria::Username(username) => user.username == *username,
        }
    }
}

/// 부분 업데이트 내용
///
/// `None`인 필드는 변경하지 않습니다. 적용 시 `updated_at`이 갱신됩니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub facebook_id: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

impl UserPatch {
    /// `$set` 연산자에 들어갈 문서
    pub fn to_set_document(&self) -> Document {
        let mut set = doc! { "updated_at": DateTime::now() };

        if let Some(username) = &self.username {
            set.insert("username", username);
        }
        if let Some(password_hash) = &self.password_hash {
            set.insert("password_hash", password_hash);
        }
        if let Some(facebook_id) = &self.facebook_id {
            set.insert("facebook_id", facebook_id);
        }
        if let Some(email) = &self.email {
            set.insert("email", email);
        }
        if let Some(full_name) = &self.full_name {
            set.insert("full_name", full_name);
        }

        set
    }

    pub fn apply(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(password_hash) = &self.password_hash {
            user.password_hash = Some(password_hash.clone());
        }
        if let Some(facebook_id) = &self.facebook_id {
            user.facebook_id = Some(facebook_id.clone());
        }
        if let Some(email) = &self.email {
            user.email = Some(email.clone());
        }
        if let Some(full_name) = &self.full_name {
            user.full_name = Some(full_name.clone());
        }
        user.updated_at = DateTime::now();
    }
}

/// 사용자 영속성 계약
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_one(&self, criteria: UserCriteria) -> AppResult<Option<User>>;

    /// 새 사용자를 저장하고 부여된 `_id`를 포함해 반환합니다.
    async fn create(&self, user: User) -> AppResult<User>;

    /// 조건에 맞는 사용자 하나를 갱신하고 갱신 후의 문서를 반환합니다.
    async fn find_one_and_update(&self, criteria: UserCriteria, patch: UserPatch) -> AppResult<Option<User>>;

    /// 16진 문자열 ID로 조회합니다. 형식이 잘못된 ID는 "없음"으로 취급합니다.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        match ObjectId::parse_str(id) {
            Ok(object_id) => self.find_one(UserCriteria::Id(object_id)).await,
            Err(_) => Ok(None),
        }
    }
}
