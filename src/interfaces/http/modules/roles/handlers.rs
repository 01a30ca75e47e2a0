//! Role management API handlers (admin only)

use axum::{extract::State, http::StatusCode};

use super::dto::{CreateRoleRequest, RoleDto, UpdateRoleRequest};
use crate::domain::{DomainError, ADMIN_ROLE};
use crate::interfaces::http::common::{
    ApiPath, ApiResult, DeletedResponse, ListParams, RawListQuery, ValidatedJson,
};
use crate::interfaces::http::modules::RepoState;
use crate::shared::{Envelope, ErrorBody, PaginatedBody, SuccessBody};

#[utoipa::path(
    get,
    path = "/api/v1/roles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(RawListQuery),
    responses(
        (status = 200, description = "Role list", body = PaginatedBody<RoleDto>),
        (status = 403, description = "Admin role required", body = ErrorBody)
    )
)]
pub async fn list_roles(
    State(state): State<RepoState>,
    ListParams(query): ListParams,
) -> ApiResult<Envelope<RoleDto>> {
    let page = state.repos.roles().list(&query).await?;
    Ok(page.map(RoleDto::from).into_envelope(query.pagination))
}

#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role details", body = SuccessBody<RoleDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_role(
    State(state): State<RepoState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Envelope<RoleDto>> {
    let role = state
        .repos
        .roles()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Role", id))?;
    Ok(Envelope::ok(role.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/roles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    request_body = CreateRoleRequest,
    responses(
        (status = 201, description = "Role created", body = SuccessBody<RoleDto>),
        (status = 409, description = "Name taken", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_role(
    State(state): State<RepoState>,
    ValidatedJson(request): ValidatedJson<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Envelope<RoleDto>)> {
    let role = state.repos.roles().create(request.into()).await?;
    Ok((StatusCode::CREATED, Envelope::ok(role.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/roles/{id}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Role ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = SuccessBody<RoleDto>),
        (status = 404, description = "Not found", body = ErrorBody),
        (status = 409, description = "Name taken, or the admin role renamed", body = ErrorBody)
    )
)]
pub async fn update_role(
    State(state): State<RepoState>,
    ApiPath(id): ApiPath<String>,
    ValidatedJson(request): ValidatedJson<UpdateRoleRequest>,
) -> ApiResult<Envelope<RoleDto>> {
    if let Some(new_name) = request.name.as_deref() {
        let current = state.repos.roles().find_by_id(&id).await?;
        if current.is_some_and(|r| r.name == ADMIN_ROLE && new_name != ADMIN_ROLE) {
            return Err(DomainError::Conflict("The admin role cannot be renamed".into()).into());
        }
    }

    let role = state
        .repos
        .roles()
        .update(&id, request.into())
        .await?
        .ok_or_else(|| DomainError::not_found("Role", id))?;
    Ok(Envelope::ok(role.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/roles/{id}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role deleted; its users lose the role", body = SuccessBody<DeletedResponse>),
        (status = 404, description = "Not found", body = ErrorBody),
        (status = 409, description = "The admin role cannot be deleted", body = ErrorBody)
    )
)]
pub async fn delete_role(
    State(state): State<RepoState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Envelope<DeletedResponse>> {
    let role = state
        .repos
        .roles()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Role", id.clone()))?;

    if role.name == ADMIN_ROLE {
        return Err(DomainError::Conflict("The admin role cannot be deleted".into()).into());
    }

    state.repos.roles().delete(&id).await?;
    Ok(Envelope::ok(DeletedResponse { id }))
}
