//! User management API handlers
//!
//! Admin-only CRUD endpoints for managing users.
//! Delegates to `UserService` from the application/identity layer.

use axum::{extract::State, http::StatusCode};

use super::dto::{CreateUserRequest, UpdateUserRequest, UserDto};
use crate::interfaces::http::common::{
    ApiPath, ApiResult, DeletedResponse, ListParams, RawListQuery, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::auth::AuthHandlerState;
use crate::shared::{Envelope, ErrorBody, PaginatedBody, SuccessBody};

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(RawListQuery),
    responses(
        (status = 200, description = "User list", body = PaginatedBody<UserDto>),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody)
    )
)]
pub async fn list_users(
    State(state): State<AuthHandlerState>,
    ListParams(query): ListParams,
) -> ApiResult<Envelope<UserDto>> {
    let page = state.user_service.list_users(&query).await?;
    Ok(page.map(UserDto::from).into_envelope(query.pagination))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = SuccessBody<UserDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_user(
    State(state): State<AuthHandlerState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Envelope<UserDto>> {
    let user = state.user_service.get_user(&id).await?;
    Ok(Envelope::ok(user.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = SuccessBody<UserDto>),
        (status = 409, description = "Username or email taken", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Envelope<UserDto>)> {
    let user = state.user_service.create_user(request.into()).await?;
    Ok((StatusCode::CREATED, Envelope::ok(user.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = SuccessBody<UserDto>),
        (status = 404, description = "Not found", body = ErrorBody),
        (status = 409, description = "Username or email taken", body = ErrorBody)
    )
)]
pub async fn update_user(
    State(state): State<AuthHandlerState>,
    ApiPath(id): ApiPath<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Envelope<UserDto>> {
    let user = state.user_service.update_user(&id, request.into()).await?;
    Ok(Envelope::ok(user.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = SuccessBody<DeletedResponse>),
        (status = 404, description = "Not found", body = ErrorBody),
        (status = 409, description = "Cannot delete own account", body = ErrorBody)
    )
)]
pub async fn delete_user(
    State(state): State<AuthHandlerState>,
    caller: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Envelope<DeletedResponse>> {
    state.user_service.delete_user(&caller.user_id, &id).await?;
    Ok(Envelope::ok(DeletedResponse { id }))
}
