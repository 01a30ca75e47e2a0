//! Role aggregate

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ListQuery;
use crate::shared::{DomainResult, Page};

#[derive(Debug, Clone)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RoleChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> DomainResult<Page<Role>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Role>>;
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Role>>;
    async fn create(&self, role: NewRole) -> DomainResult<Role>;
    async fn update(&self, id: &str, changes: RoleChanges) -> DomainResult<Option<Role>>;
    /// Users holding the role keep their account and lose the role.
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
