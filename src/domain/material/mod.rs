//! Material aggregate
//!
//! A material is always measured in exactly one unit of measure.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ListQuery;
use crate::shared::{DomainResult, Page};

/// Unit of measure as seen from a material record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRef {
    pub id: String,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Material {
    pub id: String,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub unit: UnitRef,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub unit_of_measure_id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MaterialChanges {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit_of_measure_id: Option<String>,
    pub is_active: Option<bool>,
}

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> DomainResult<Page<Material>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Material>>;
    /// Fails with `Validation` when the unit of measure does not exist.
    async fn create(&self, material: NewMaterial) -> DomainResult<Material>;
    async fn update(&self, id: &str, changes: MaterialChanges) -> DomainResult<Option<Material>>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
