//! 메모리 기반 사용자 저장소
//!
//! MongoDB 없이 서비스/미들웨어를 실행할 때 사용합니다.
//! 유니크 인덱스와 같은 제약(email, username, facebook_id, google_id)을 검사합니다.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::{AppError, AppResult, ErrorContext, FailureCode};
use crate::domain::entities::users::user::User;
use super::{UserCriteria, UserPatch, UserStore};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    unavailable: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 사용자 전체의 복사본
    pub fn snapshot(&self) -> Vec<User> {
        self.users.lock().map(|users| users.clone()).unwrap_or_default()
    }

    /// 켜면 이후 모든 호출이 `DatabaseError`로 실패합니다.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Vec<User>>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("user store unavailable".to_string()));
        }
        self.users
            .lock()
            .context("사용자 저장소 잠금 실패")
    }

    fn conflicts(existing: &User, candidate: &User) -> bool {
        let same = |a: &Option<String>, b: &Option<String>| a.is_some() && a == b;

        existing.id != candidate.id
            && (existing.username == candidate.username
                || same(&existing.email, &candidate.email)
                || same(&existing.facebook_id, &candidate.facebook_id)
                || same(&existing.google_id, &candidate.google_id))
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn find_one(&self, criteria: UserCriteria) -> AppResult<Option<User>> {
        let users = self.lock()?;
        Ok(users.iter().find(|u| criteria.matches(u)).cloned())
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut users = self.lock()?;
        user.id = Some(ObjectId::new());

        if users.iter().any(|existing| Self::conflicts(existing, &user)) {
            return Err(AppError::failure(
                FailureCode::UserAlreadyExists,
                format!("duplicate key for username {}", user.username),
            ));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_one_and_update(&self, criteria: UserCriteria, patch: UserPatch) -> AppResult<Option<User>> {
        let mut users = self.lock()?;
        let Some(index) = users.iter().position(|u| criteria.matches(u)) else {
            return Ok(None);
        };

        let mut updated = users[index].clone();
        patch.apply(&mut updated);

        if users.iter().any(|existing| Self::conflicts(existing, &updated)) {
            return Err(AppError::failure(
                FailureCode::UserAlreadyExists,
                format!("duplicate key for username {}", updated.username),
            ));
        }

        users[index] = updated.clone();
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(email: &str, username: &str) -> User {
        User::new_local(email.into(), username.into(), None, "hash".into())
    }

    #[actix_web::test]
    async fn test_create_assigns_id_and_enforces_unique_email() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create(local("a@example.com", "a")).await.unwrap();
        assert!(created.id.is_some());

        let err = repo.create(local("a@example.com", "b")).await.unwrap_err();
        assert_eq!(err.failure_code(), FailureCode::UserAlreadyExists);
    }

    #[actix_web::test]
    async fn test_unavailable_store_fails_lookups() {
        let repo = InMemoryUserRepository::new();
        repo.set_unavailable(true);

        let err = repo.find_one(UserCriteria::Email("a@example.com".into())).await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[actix_web::test]
    async fn test_find_by_malformed_id_is_none() {
        let repo = InMemoryUserRepository::new();
        repo.create(local("a@example.com", "a")).await.unwrap();

        assert!(repo.find_by_id("not-an-object-id").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_update_by_primary_key() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(local("a@example.com", "a")).await.unwrap();

        let updated = repo
            .find_one_and_update(
                UserCriteria::Id(created.id.unwrap()),
                UserPatch { facebook_id: Some("fb-1".into()), ..Default::default() },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.facebook_id.as_deref(), Some("fb-1"));
        assert_eq!(updated.password_hash.as_deref(), Some("hash"));
        assert_eq!(
            repo.find_one(UserCriteria::FacebookId("fb-1".into())).await.unwrap().unwrap().id,
            created.id
        );
    }
}
