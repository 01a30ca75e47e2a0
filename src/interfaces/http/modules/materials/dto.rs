//! Material DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Material, MaterialChanges, NewMaterial, UnitRef};

/// Unit of measure summary embedded in a material
#[derive(Debug, Serialize, ToSchema)]
pub struct UnitRefDto {
    pub id: String,
    pub code: String,
    pub name: String,
}

impl From<UnitRef> for UnitRefDto {
    fn from(u: UnitRef) -> Self {
        Self {
            id: u.id,
            code: u.code,
            name: u.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDto {
    pub id: String,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub unit_of_measure: UnitRefDto,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Material> for MaterialDto {
    fn from(m: Material) -> Self {
        Self {
            id: m.id,
            code: m.code,
            name: m.name,
            description: m.description,
            unit_of_measure: m.unit.into(),
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialRequest {
    #[validate(length(min = 1, max = 50, message = "code must be 1-50 characters"))]
    pub code: String,
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "unit of measure is required"))]
    pub unit_of_measure_id: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl From<CreateMaterialRequest> for NewMaterial {
    fn from(r: CreateMaterialRequest) -> Self {
        Self {
            code: r.code,
            name: r.name,
            description: r.description,
            unit_of_measure_id: r.unit_of_measure_id,
            is_active: r.is_active,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaterialRequest {
    #[validate(length(min = 1, max = 50, message = "code must be 1-50 characters"))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "unit of measure cannot be empty"))]
    pub unit_of_measure_id: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateMaterialRequest> for MaterialChanges {
    fn from(r: UpdateMaterialRequest) -> Self {
        Self {
            code: r.code,
            name: r.name,
            description: r.description,
            unit_of_measure_id: r.unit_of_measure_id,
            is_active: r.is_active,
        }
    }
}
