//! Authentication middleware for Axum

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::application::SharedTokenStore;
use crate::infrastructure::crypto::jwt::{verify_token, Claims, JwtConfig};
use crate::interfaces::http::common::ApiError;

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    RevokedToken,
    InsufficientPermissions,
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::MissingToken => ApiError::Unauthorized("Missing authentication token".into()),
            AuthError::InvalidToken => ApiError::Unauthorized("Invalid authentication token".into()),
            AuthError::ExpiredToken => ApiError::Unauthorized("Token has expired".into()),
            AuthError::RevokedToken => ApiError::Unauthorized("Token has been revoked".into()),
            AuthError::InsufficientPermissions => {
                ApiError::Forbidden("Insufficient permissions".into())
            }
        }
    }
}

/// State shared by the auth middleware: signing config and revoked tokens
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub tokens: SharedTokenStore,
}

/// Caller identity established from a verified JWT
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
    pub role: String,
    pub claims: Claims,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            username: claims.username.clone(),
            role: claims.role.clone(),
            claims,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.claims.is_admin()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AuthError::MissingToken.into())
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(request: &Request<Body>, auth_state: &AuthState) -> Result<Claims, AuthError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = extract_token(auth_header).ok_or(AuthError::InvalidToken)?;

    let claims = verify_token(token, &auth_state.jwt_config).map_err(|e| {
        debug!(error = %e, "JWT rejected");
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        }
    })?;

    if claims.is_expired() {
        return Err(AuthError::ExpiredToken);
    }
    if auth_state.tokens.is_revoked(&claims.jti) {
        return Err(AuthError::RevokedToken);
    }

    Ok(claims)
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&request, &auth_state) {
        Ok(claims) => {
            let user = AuthenticatedUser::from_claims(claims);
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Requires the `admin` role. Must run after `auth_middleware`.
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.is_admin() => next.run(request).await,
        Some(_) => ApiError::from(AuthError::InsufficientPermissions).into_response(),
        None => ApiError::from(AuthError::MissingToken).into_response(),
    }
}
