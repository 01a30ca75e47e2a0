//! Unit of measure API handlers

use axum::{extract::State, http::StatusCode};

use super::dto::{CreateUnitRequest, UnitDto, UpdateUnitRequest};
use crate::domain::DomainError;
use crate::interfaces::http::common::{
    ApiPath, ApiResult, DeletedResponse, ListParams, RawListQuery, ValidatedJson,
};
use crate::interfaces::http::modules::RepoState;
use crate::shared::{Envelope, ErrorBody, PaginatedBody, SuccessBody};

#[utoipa::path(
    get,
    path = "/api/v1/units",
    tag = "Units of Measure",
    security(("bearer_auth" = [])),
    params(RawListQuery),
    responses(
        (status = 200, description = "Unit page", body = PaginatedBody<UnitDto>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub async fn list_units(
    State(state): State<RepoState>,
    ListParams(query): ListParams,
) -> ApiResult<Envelope<UnitDto>> {
    let page = state.repos.units().list(&query).await?;
    Ok(page.map(UnitDto::from).into_envelope(query.pagination))
}

#[utoipa::path(
    get,
    path = "/api/v1/units/{id}",
    tag = "Units of Measure",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Unit of measure ID")),
    responses(
        (status = 200, description = "Unit of measure details", body = SuccessBody<UnitDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_unit(
    State(state): State<RepoState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Envelope<UnitDto>> {
    let item = state
        .repos
        .units()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Unit of measure", id))?;
    Ok(Envelope::ok(item.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/units",
    tag = "Units of Measure",
    security(("bearer_auth" = [])),
    request_body = CreateUnitRequest,
    responses(
        (status = 201, description = "Unit of measure created", body = SuccessBody<UnitDto>),
        (status = 409, description = "Code already in use", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_unit(
    State(state): State<RepoState>,
    ValidatedJson(request): ValidatedJson<CreateUnitRequest>,
) -> ApiResult<(StatusCode, Envelope<UnitDto>)> {
    let item = state.repos.units().create(request.into()).await?;
    Ok((StatusCode::CREATED, Envelope::ok(item.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/units/{id}",
    tag = "Units of Measure",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Unit of measure ID")),
    request_body = UpdateUnitRequest,
    responses(
        (status = 200, description = "Unit of measure updated", body = SuccessBody<UnitDto>),
        (status = 404, description = "Not found", body = ErrorBody),
        (status = 409, description = "Code already in use", body = ErrorBody)
    )
)]
pub async fn update_unit(
    State(state): State<RepoState>,
    ApiPath(id): ApiPath<String>,
    ValidatedJson(request): ValidatedJson<UpdateUnitRequest>,
) -> ApiResult<Envelope<UnitDto>> {
    let item = state
        .repos
        .units()
        .update(&id, request.into())
        .await?
        .ok_or_else(|| DomainError::not_found("Unit of measure", id))?;
    Ok(Envelope::ok(item.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/units/{id}",
    tag = "Units of Measure",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Unit of measure ID")),
    responses(
        (status = 200, description = "Unit of measure deleted", body = SuccessBody<DeletedResponse>),
        (status = 404, description = "Not found", body = ErrorBody),
        (status = 409, description = "Unit is used by materials", body = ErrorBody)
    )
)]
pub async fn delete_unit(
    State(state): State<RepoState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Envelope<DeletedResponse>> {
    state.repos.units().delete(&id).await?;
    Ok(Envelope::ok(DeletedResponse { id }))
}
