//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        records::{CatalogItemRecord, HorseRecord},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_items(&self) -> Result<Vec<CatalogItemRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.repository.list_items(&mut tx).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn list_horses(&self) -> Result<Vec<HorseRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let horses = self.repository.list_horses(&mut tx).await?;

        tx.commit().await?;

        Ok(horses)
    }
}

#[automock]
#[async_trait]
/// Read-only catalog queries.
pub trait CatalogService: Send + Sync {
    /// All catalog items by name.
    async fn list_items(&self) -> Result<Vec<CatalogItemRecord>, CatalogServiceError>;

    /// Active horses by name.
    async fn list_horses(&self) -> Result<Vec<HorseRecord>, CatalogServiceError>;
}
