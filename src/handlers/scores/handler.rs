//! Score handler implementations

use axum::{Json, extract::State};

use crate::{
    constants::MAX_IMPORT_ROWS,
    error::{AppError, AppResult},
    handlers::require_admin,
    middleware::auth::AuthenticatedUser,
    services::{
        ScoreService,
        score_service::{ScoreMatrix, SheetImportStats},
    },
    state::AppState,
};

use super::{
    request::{ScoreSheet, UpdateScoresRequest},
    response::UpdateScoresResponse,
};

/// Every student, exam and score
pub async fn score_matrix(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ScoreMatrix>> {
    require_admin(&auth_user)?;

    let matrix = ScoreService::matrix(state.db()).await?;
    Ok(Json(matrix))
}

/// Apply a batch of score changes
pub async fn update_scores(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<UpdateScoresRequest>,
) -> AppResult<Json<UpdateScoresResponse>> {
    require_admin(&auth_user)?;

    let changed = ScoreService::bulk_update(state.db(), &payload.updates).await?;

    Ok(Json(UpdateScoresResponse {
        requested: payload.updates.len(),
        changed,
    }))
}

/// Import rows of a score spreadsheet
pub async fn import_score_sheet(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(sheet): Json<ScoreSheet>,
) -> AppResult<Json<SheetImportStats>> {
    require_admin(&auth_user)?;

    if sheet.rows.len() > MAX_IMPORT_ROWS {
        return Err(AppError::Validation(format!(
            "At most {} rows per import",
            MAX_IMPORT_ROWS
        )));
    }

    let stats = ScoreService::import_sheet(state.db(), &sheet).await?;
    Ok(Json(stats))
}
