//! 메모리 기반 에러 설명 저장소

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::entities::errors::error_description::ErrorDescription;
use super::ErrorDescriptionStore;

#[derive(Default)]
pub struct InMemoryErrorDescriptionRepository {
    descriptions: Mutex<Vec<ErrorDescription>>,
    unavailable: AtomicBool,
}

impl InMemoryErrorDescriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 주어진 레코드로 채워진 저장소
    pub fn with_descriptions(descriptions: Vec<ErrorDescription>) -> Self {
        Self {
            descriptions: Mutex::new(descriptions),
            unavailable: AtomicBool::new(false),
        }
    }

    /// 이후 모든 조회가 `DatabaseError`로 실패하도록 설정합니다.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Vec<ErrorDescription>>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("error description store unavailable".to_string()));
        }
        self.descriptions
            .lock()
            .context("에러 설명 저장소 잠금 실패")
    }
}

#[async_trait]
impl ErrorDescriptionStore for InMemoryErrorDescriptionRepository {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<ErrorDescription>> {
        Ok(self.lock()?.iter().find(|d| d.code == code).cloned())
    }

    async fn create(&self, mut description: ErrorDescription) -> AppResult<ErrorDescription> {
        let mut descriptions = self.lock()?;
        if descriptions.iter().any(|d| d.code == description.code) {
            return Err(AppError::DatabaseError(format!("duplicate error code {}", description.code)));
        }
        description.id = Some(ObjectId::new());
        descriptions.push(description.clone());
        Ok(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_seed_does_not_overwrite_existing_codes() {
        let custom = ErrorDescription {
            id: None,
            code: "ERR_AUTH_FAILED".into(),
            status: 403,
            description: "custom".into(),
        };
        let repo = InMemoryErrorDescriptionRepository::with_descriptions(vec![custom]);

        let inserted = repo.seed(ErrorDescription::defaults()).await.unwrap();

        assert_eq!(inserted, ErrorDescription::defaults().len() - 1);
        let auth = repo.find_by_code("ERR_AUTH_FAILED").await.unwrap().unwrap();
        assert_eq!(auth.status, 403);
    }

    #[actix_web::test]
    async fn test_seed_is_idempotent() {
        let repo = InMemoryErrorDescriptionRepository::new();

        let first = repo.seed(ErrorDescription::defaults()).await.unwrap();
        let second = repo.seed(ErrorDescription::defaults()).await.unwrap();

        assert_eq!(first, ErrorDescription::defaults().len());
        assert_eq!(second, 0);
    }

    #[actix_web::test]
    async fn test_unavailable_store_fails_lookups() {
        let repo = InMemoryErrorDescriptionRepository::new();
        repo.set_unavailable(true);

        assert!(repo.find_by_code("ERR_AUTH_FAILED").await.is_err());
    }
}
