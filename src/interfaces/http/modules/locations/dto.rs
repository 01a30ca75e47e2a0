//! Location DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Location, LocationChanges, NewLocation};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub id: String,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Location> for LocationDto {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            code: l.code,
            name: l.name,
            address: l.address,
            is_active: l.is_active,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, max = 50, message = "code must be 1-50 characters"))]
    pub code: String,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 255, message = "address must be at most 255 characters"))]
    pub address: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl From<CreateLocationRequest> for NewLocation {
    fn from(r: CreateLocationRequest) -> Self {
        Self {
            code: r.code,
            name: r.name,
            address: r.address,
            is_active: r.is_active,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    #[validate(length(min = 1, max = 50, message = "code must be 1-50 characters"))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 255, message = "address must be at most 255 characters"))]
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateLocationRequest> for LocationChanges {
    fn from(r: UpdateLocationRequest) -> Self {
        Self {
            code: r.code,
            name: r.name,
            address: r.address,
            is_active: r.is_active,
        }
    }
}
