//! Authentication handler implementations

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::{
    constants::AUTH_BRIDGE_HEADER,
    error::{AppError, AppResult},
    middleware::{ClientInfo, auth::AuthenticatedUser},
    services::{AuthService, LoginLogService},
    state::AppState,
    utils::secrets_match,
};

use super::{
    request::SessionRequest,
    response::{SessionResponse, UserResponse},
};

/// Exchange an identity verified by the OAuth front for an API token
pub async fn open_session(
    State(state): State<AppState>,
    client: ClientInfo,
    headers: HeaderMap,
    Json(payload): Json<SessionRequest>,
) -> AppResult<Json<SessionResponse>> {
    let presented = headers
        .get(AUTH_BRIDGE_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    if !secrets_match(presented, &state.config().auth.bridge_secret) {
        tracing::warn!("Session request with a wrong bridge secret");
        return Err(AppError::Unauthorized);
    }

    payload.validate()?;

    let (user, access_token, expires_in) =
        AuthService::sign_in(state.db(), state.config(), &payload.email, &payload.name).await?;

    // A lost audit entry must not block the sign-in itself
    if let Err(e) = LoginLogService::record(state.db(), &user, &client).await {
        tracing::error!(user_id = %user.id, error = %e, "Failed to record login");
    }

    Ok(Json(SessionResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in,
        user: user.into(),
    }))
}

/// Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<UserResponse>> {
    let user = AuthService::get_user_by_id(state.db(), &auth_user.id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(user.into()))
}
