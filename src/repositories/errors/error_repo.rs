//! # MongoDB 에러 설명 리포지토리

use async_trait::async_trait;
use log::info;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::errors::error_description::ErrorDescription;
use super::ErrorDescriptionStore;

const COLLECTION: &str = "error_descriptions";

pub struct MongoErrorDescriptionRepository {
    collection: Collection<ErrorDescription>,
}

impl MongoErrorDescriptionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_database().collection::<ErrorDescription>(COLLECTION),
        }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let code_index = IndexModel::builder()
            .keys(doc! { "code": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("code_unique".to_string())
                .build())
            .build();

        self.collection
            .create_index(code_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        info!("error_descriptions 컬렉션 인덱스 생성 완료");
        Ok(())
    }
}

#[async_trait]
impl ErrorDescriptionStore for MongoErrorDescriptionRepository {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<ErrorDescription>> {
        self.collection
            .find_one(doc! { "code": code })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut description: ErrorDescription) -> AppResult<ErrorDescription> {
        let result = self.collection
            .insert_one(&description)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        description.id = result.inserted_id.as_object_id();
        Ok(description)
    }
}
