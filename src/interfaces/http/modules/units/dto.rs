//! Unit of measure DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{NewUnitOfMeasure, UnitOfMeasure, UnitOfMeasureChanges};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitDto {
    pub id: String,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UnitOfMeasure> for UnitDto {
    fn from(u: UnitOfMeasure) -> Self {
        Self {
            id: u.id,
            code: u.code,
            name: u.name,
            description: u.description,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUnitRequest {
    #[validate(length(min = 1, max = 20, message = "code must be 1-20 characters"))]
    pub code: String,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 255, message = "description must be at most 255 characters"))]
    pub description: Option<String>,
}

impl From<CreateUnitRequest> for NewUnitOfMeasure {
    fn from(r: CreateUnitRequest) -> Self {
        Self {
            code: r.code,
            name: r.name,
            description: r.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUnitRequest {
    #[validate(length(min = 1, max = 20, message = "code must be 1-20 characters"))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 255, message = "description must be at most 255 characters"))]
    pub description: Option<String>,
}

impl From<UpdateUnitRequest> for UnitOfMeasureChanges {
    fn from(r: UpdateUnitRequest) -> Self {
        Self {
            code: r.code,
            name: r.name,
            description: r.description,
        }
    }
}
