//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::NewAccount;
use crate::domain::{RoleRef, User, UserChanges};

/// Role summary embedded in a user
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleRefDto {
    pub id: String,
    pub name: String,
}

impl From<RoleRef> for RoleRefDto {
    fn from(r: RoleRef) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

/// User API representation. The password hash never leaves the service.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Option<RoleRefDto>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            full_name: u.full_name,
            role: u.role.map(RoleRefDto::from),
            is_active: u.is_active,
            created_at: u.created_at,
            updated_at: u.updated_at,
            last_login_at: u.last_login_at,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
    #[validate(length(max = 100, message = "full name must be at most 100 characters"))]
    pub full_name: Option<String>,
    pub role_id: Option<String>,
}

impl From<CreateUserRequest> for NewAccount {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            password: r.password,
            full_name: r.full_name,
            role_id: r.role_id.filter(|id| !id.is_empty()),
        }
    }
}

/// Update user request. Absent fields are left unchanged; an empty
/// `roleId` removes the role.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    #[validate(length(max = 100, message = "full name must be at most 100 characters"))]
    pub full_name: Option<String>,
    pub role_id: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            full_name: r.full_name,
            role_id: r.role_id,
            is_active: r.is_active,
        }
    }
}
