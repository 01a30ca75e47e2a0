//! Material API handlers

use axum::{extract::State, http::StatusCode};

use super::dto::{CreateMaterialRequest, MaterialDto, UpdateMaterialRequest};
use crate::domain::DomainError;
use crate::interfaces::http::common::{
    ApiPath, ApiResult, DeletedResponse, ListParams, RawListQuery, ValidatedJson,
};
use crate::interfaces::http::modules::RepoState;
use crate::shared::{Envelope, ErrorBody, PaginatedBody, SuccessBody};

#[utoipa::path(
    get,
    path = "/api/v1/materials",
    tag = "Materials",
    security(("bearer_auth" = [])),
    params(RawListQuery),
    responses(
        (status = 200, description = "Material page", body = PaginatedBody<MaterialDto>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub async fn list_materials(
    State(state): State<RepoState>,
    ListParams(query): ListParams,
) -> ApiResult<Envelope<MaterialDto>> {
    let page = state.repos.materials().list(&query).await?;
    Ok(page.map(MaterialDto::from).into_envelope(query.pagination))
}

#[utoipa::path(
    get,
    path = "/api/v1/materials/{id}",
    tag = "Materials",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Material ID")),
    responses(
        (status = 200, description = "Material details", body = SuccessBody<MaterialDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_material(
    State(state): State<RepoState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Envelope<MaterialDto>> {
    let item = state
        .repos
        .materials()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Material", id))?;
    Ok(Envelope::ok(item.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/materials",
    tag = "Materials",
    security(("bearer_auth" = [])),
    request_body = CreateMaterialRequest,
    responses(
        (status = 201, description = "Material created", body = SuccessBody<MaterialDto>),
        (status = 409, description = "Code already in use", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_material(
    State(state): State<RepoState>,
    ValidatedJson(request): ValidatedJson<CreateMaterialRequest>,
) -> ApiResult<(StatusCode, Envelope<MaterialDto>)> {
    let item = state.repos.materials().create(request.into()).await?;
    Ok((StatusCode::CREATED, Envelope::ok(item.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/materials/{id}",
    tag = "Materials",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Material ID")),
    request_body = UpdateMaterialRequest,
    responses(
        (status = 200, description = "Material updated", body = SuccessBody<MaterialDto>),
        (status = 404, description = "Not found", body = ErrorBody),
        (status = 409, description = "Code already in use", body = ErrorBody)
    )
)]
pub async fn update_material(
    State(state): State<RepoState>,
    ApiPath(id): ApiPath<String>,
    ValidatedJson(request): ValidatedJson<UpdateMaterialRequest>,
) -> ApiResult<Envelope<MaterialDto>> {
    let item = state
        .repos
        .materials()
        .update(&id, request.into())
        .await?
        .ok_or_else(|| DomainError::not_found("Material", id))?;
    Ok(Envelope::ok(item.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/materials/{id}",
    tag = "Materials",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Material ID")),
    responses(
        (status = 200, description = "Material deleted", body = SuccessBody<DeletedResponse>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn delete_material(
    State(state): State<RepoState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Envelope<DeletedResponse>> {
    state.repos.materials().delete(&id).await?;
    Ok(Envelope::ok(DeletedResponse { id }))
}
