use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    Json,
};
use std::sync::Arc;

use super::error::ApiError;
use super::validation::{validate_login, validate_register};
use super::StatusResponse;
use crate::auth::{AuthError, AuthenticatedRetailer};
use crate::db::{LoginRequest, LoginResponse, RegisterRequest};
use crate::AppState;

/// Register a retailer account
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_register(&request)?;

    let id = state.accounts.register(&request).await?;
    Ok(Json(StatusResponse::created(id)))
}

/// Exchange email and password for a bearer token
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    validate_login(&request)?;

    let token = state.accounts.login(&request).await?;
    Ok(Json(LoginResponse { token }))
}

/// Pull the token out of `Authorization: Bearer <token>`; the scheme is case-insensitive
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    match header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::MissingToken),
    }
}

/// Extractor for the retailer behind the request's bearer token
#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthenticatedRetailer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        Ok(state.sessions.validate(token).await?)
    }
}
