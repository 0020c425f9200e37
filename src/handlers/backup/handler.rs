//! Backup handler implementations

use axum::{
    Json,
    extract::State,
    http::header::{CONTENT_DISPOSITION, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::{
    error::AppResult,
    handlers::require_admin,
    middleware::auth::AuthenticatedUser,
    models::BackupDocument,
    services::BackupService,
    state::AppState,
};

use super::response::RestoreResponse;

/// Download the whole database as a backup document
pub async fn export_backup(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Response> {
    require_admin(&auth_user)?;

    let document = BackupService::export(state.db()).await?;
    let filename = format!(
        "attachment; filename=\"gradebook-backup-{}.json\"",
        document.exported_at.format("%Y%m%d-%H%M%S")
    );

    let mut response = Json(document).into_response();
    if let Ok(value) = HeaderValue::from_str(&filename) {
        response.headers_mut().insert(CONTENT_DISPOSITION, value);
    }

    Ok(response)
}

/// Replace the database with an uploaded backup
pub async fn restore_backup(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(document): Json<BackupDocument>,
) -> AppResult<Json<RestoreResponse>> {
    require_admin(&auth_user)?;

    tracing::warn!(admin_id = %auth_user.id, "Restoring database from backup");
    let counts = BackupService::restore(state.db(), &document).await?;

    Ok(Json(counts.into()))
}
