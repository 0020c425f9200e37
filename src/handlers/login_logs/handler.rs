//! Login log handler implementations

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    error::AppResult, handlers::require_admin, middleware::auth::AuthenticatedUser,
    services::LoginLogService, state::AppState,
};

use super::{
    request::ListLoginLogsQuery,
    response::{LoginLogResponse, LoginLogsListResponse},
};

/// List recent sign-ins
pub async fn list_login_logs(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListLoginLogsQuery>,
) -> AppResult<Json<LoginLogsListResponse>> {
    require_admin(&auth_user)?;

    let logs = LoginLogService::recent(state.db(), query.limit).await?;

    Ok(Json(LoginLogsListResponse {
        logs: logs.into_iter().map(LoginLogResponse::from).collect(),
        retention_days: state.config().auth.login_log_retention_days,
    }))
}
