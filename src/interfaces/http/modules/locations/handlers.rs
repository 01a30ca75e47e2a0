//! Location API handlers

use axum::{extract::State, http::StatusCode};

use super::dto::{CreateLocationRequest, LocationDto, UpdateLocationRequest};
use crate::domain::DomainError;
use crate::interfaces::http::common::{
    ApiPath, ApiResult, DeletedResponse, ListParams, RawListQuery, ValidatedJson,
};
use crate::interfaces::http::modules::RepoState;
use crate::shared::{Envelope, ErrorBody, PaginatedBody, SuccessBody};

#[utoipa::path(
    get,
    path = "/api/v1/locations",
    tag = "Locations",
    security(("bearer_auth" = [])),
    params(RawListQuery),
    responses(
        (status = 200, description = "Location page", body = PaginatedBody<LocationDto>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub async fn list_locations(
    State(state): State<RepoState>,
    ListParams(query): ListParams,
) -> ApiResult<Envelope<LocationDto>> {
    let page = state.repos.locations().list(&query).await?;
    Ok(page.map(LocationDto::from).into_envelope(query.pagination))
}

#[utoipa::path(
    get,
    path = "/api/v1/locations/{id}",
    tag = "Locations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location details", body = SuccessBody<LocationDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_location(
    State(state): State<RepoState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Envelope<LocationDto>> {
    let item = state
        .repos
        .locations()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Location", id))?;
    Ok(Envelope::ok(item.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/locations",
    tag = "Locations",
    security(("bearer_auth" = [])),
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Location created", body = SuccessBody<LocationDto>),
        (status = 409, description = "Code already in use", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_location(
    State(state): State<RepoState>,
    ValidatedJson(request): ValidatedJson<CreateLocationRequest>,
) -> ApiResult<(StatusCode, Envelope<LocationDto>)> {
    let item = state.repos.locations().create(request.into()).await?;
    Ok((StatusCode::CREATED, Envelope::ok(item.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/locations/{id}",
    tag = "Locations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Location ID")),
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "Location updated", body = SuccessBody<LocationDto>),
        (status = 404, description = "Not found", body = ErrorBody),
        (status = 409, description = "Code already in use", body = ErrorBody)
    )
)]
pub async fn update_location(
    State(state): State<RepoState>,
    ApiPath(id): ApiPath<String>,
    ValidatedJson(request): ValidatedJson<UpdateLocationRequest>,
) -> ApiResult<Envelope<LocationDto>> {
    let item = state
        .repos
        .locations()
        .update(&id, request.into())
        .await?
        .ok_or_else(|| DomainError::not_found("Location", id))?;
    Ok(Envelope::ok(item.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/locations/{id}",
    tag = "Locations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location deleted", body = SuccessBody<DeletedResponse>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn delete_location(
    State(state): State<RepoState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Envelope<DeletedResponse>> {
    state.repos.locations().delete(&id).await?;
    Ok(Envelope::ok(DeletedResponse { id }))
}
