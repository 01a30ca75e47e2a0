//! Authentication API handlers
//!
//! Thin wrappers over `UserService`.

use std::sync::Arc;

use axum::extract::State;

use super::dto::{ChangePasswordRequest, LoginRequest, LoginResponse};
use crate::application::UserService;
use crate::interfaces::http::common::{ApiResult, MessageResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::users::UserDto;
use crate::shared::{Envelope, ErrorBody, SuccessBody};

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub user_service: Arc<UserService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = SuccessBody<LoginResponse>),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Envelope<LoginResponse>> {
    let auth = state
        .user_service
        .login(&request.username, &request.password)
        .await?;
    Ok(Envelope::ok(auth.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = SuccessBody<UserDto>),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    user: AuthenticatedUser,
) -> ApiResult<Envelope<UserDto>> {
    let user = state.user_service.get_user(&user.user_id).await?;
    Ok(Envelope::ok(user.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token revoked", body = SuccessBody<MessageResponse>),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    )
)]
pub async fn logout(
    State(state): State<AuthHandlerState>,
    user: AuthenticatedUser,
) -> Envelope<MessageResponse> {
    state.user_service.logout(&user.claims);
    Envelope::ok(MessageResponse::new("Logged out"))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = SuccessBody<MessageResponse>),
        (status = 401, description = "Wrong current password", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn change_password(
    State(state): State<AuthHandlerState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Envelope<MessageResponse>> {
    state
        .user_service
        .change_password(&user.user_id, &request.current_password, &request.new_password)
        .await?;
    Ok(Envelope::ok(MessageResponse::new("Password changed")))
}
