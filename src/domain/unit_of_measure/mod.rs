//! Unit of measure aggregate (kg, pcs, m, ...)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ListQuery;
use crate::shared::{DomainResult, Page};

#[derive(Debug, Clone)]
pub struct UnitOfMeasure {
    pub id: String,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUnitOfMeasure {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UnitOfMeasureChanges {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[async_trait]
pub trait UnitOfMeasureRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> DomainResult<Page<UnitOfMeasure>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<UnitOfMeasure>>;
    async fn create(&self, unit: NewUnitOfMeasure) -> DomainResult<UnitOfMeasure>;
    async fn update(
        &self,
        id: &str,
        changes: UnitOfMeasureChanges,
    ) -> DomainResult<Option<UnitOfMeasure>>;
    /// Fails with `Conflict` while any material still uses the unit.
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
