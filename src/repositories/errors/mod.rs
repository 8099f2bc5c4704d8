//! 에러 설명 저장소 추상화
//!
//! 실패 코드와 HTTP 상태/설명의 대응은 운영자가 데이터베이스에서 관리합니다.

pub mod error_repo;
pub mod memory;

use async_trait::async_trait;
use log::info;

use crate::core::errors::AppResult;
use crate::domain::entities::errors::error_description::ErrorDescription;

pub use error_repo::MongoErrorDescriptionRepository;
pub use memory::InMemoryErrorDescriptionRepository;

#[async_trait]
pub trait ErrorDescriptionStore: Send + Sync {
    /// 코드로 단건 조회. 코드는 유일합니다.
    async fn find_by_code(&self, code: &str) -> AppResult<Option<ErrorDescription>>;

    async fn create(&self, description: ErrorDescription) -> AppResult<ErrorDescription>;

    /// 아직 저장되지 않은 코드만 추가합니다. 기존 레코드는 덮어쓰지 않습니다.
    ///
    /// 새로 추가된 레코드 수를 반환합니다.
    async fn seed(&self, descriptions: Vec<ErrorDescription>) -> AppResult<usize> {
        let mut inserted = 0;

        for description in descriptions {
            if self.find_by_code(&description.code).await?.is_none() {
                info!("에러 설명 시드 추가: {}", description.code);
                self.create(description).await?;
                inserted += 1;
            }
        }

        Ok(inserted)
    }
}
