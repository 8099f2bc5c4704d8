//! # MongoDB 사용자 리포지토리
//!
//! `users` 컬렉션에 대한 [`UserStore`] 구현입니다.

use async_trait::async_trait;
use log::{debug, info};
use mongodb::{
    bson::{doc, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::core::errors::{AppError, AppResult, FailureCode};
use crate::db::Database;
use crate::domain::entities::users::user::User;
use super::{UserCriteria, UserPatch, UserStore};

const COLLECTION: &str = "users";

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_database().collection::<User>(COLLECTION),
        }
    }

    /// 유니크 인덱스 생성
    ///
    /// `email`, `facebook_id`, `google_id`는 값이 없는 문서가 있을 수 있으므로 sparse로 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let unique_sparse = |field: &str| {
            let mut keys = Document::new();
            keys.insert(field, 1);
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name(format!("{}_unique", field))
                    .build())
                .build()
        };

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([
                unique_sparse("email"),
                username_index,
                unique_sparse("facebook_id"),
                unique_sparse("google_id"),
            ])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        info!("users 컬렉션 인덱스 생성 완료");
        Ok(())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

#[async_trait]
impl UserStore for MongoUserRepository {
    async fn find_one(&self, criteria: UserCriteria) -> AppResult<Option<User>> {
        self.collection
            .find_one(criteria.to_filter())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let result = self.collection
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::failure(FailureCode::UserAlreadyExists, e.to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError("삽입된 문서의 _id가 ObjectId가 아닙니다".to_string())
        })?;
        user.id = Some(id);

        debug!("사용자 생성: id={}, username={}", id.to_hex(), user.username);
        Ok(user)
    }

    async fn find_one_and_update(&self, criteria: UserCriteria, patch: UserPatch) -> AppResult<Option<User>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(criteria.to_filter(), doc! { "$set": patch.to_set_document() })
            .with_options(options)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::failure(FailureCode::UserAlreadyExists, e.to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })
    }
}
