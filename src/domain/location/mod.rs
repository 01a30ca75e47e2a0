//! Location aggregate (warehouses, plants, sites)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ListQuery;
use crate::shared::{DomainResult, Page};

#[derive(Debug, Clone)]
pub struct Location {
    pub id: String,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLocation {
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LocationChanges {
    pub code: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> DomainResult<Page<Location>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Location>>;
    async fn create(&self, location: NewLocation) -> DomainResult<Location>;
    async fn update(&self, id: &str, changes: LocationChanges) -> DomainResult<Option<Location>>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
