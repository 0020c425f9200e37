//! Grade handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    handlers::require_admin,
    middleware::auth::AuthenticatedUser,
    services::{GradeService, StudentService},
    state::AppState,
};

use super::{
    request::AggregateRequest,
    response::{AggregateResponse, GradeReportResponse, GradeTableResponse},
};

/// Grade report of the calling student
pub async fn my_grades(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<GradeReportResponse>> {
    let student = StudentService::get_student(state.db(), &auth_user.id)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::Forbidden("Only students have grades".to_string()),
            other => other,
        })?;

    let policy = state.config().grading.policy();
    let report = GradeService::report(state.scores(), &student, &policy).await?;

    Ok(Json(report))
}

/// Grade report of any student
pub async fn student_grades(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(student_id): Path<Uuid>,
) -> AppResult<Json<GradeReportResponse>> {
    require_admin(&auth_user)?;

    let student = StudentService::get_student(state.db(), &student_id).await?;
    let policy = state.config().grading.policy();
    let report = GradeService::report(state.scores(), &student, &policy).await?;

    Ok(Json(report))
}

/// Aggregate many students in one pass
pub async fn aggregate_grades(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<AggregateRequest>,
) -> AppResult<Json<AggregateResponse>> {
    require_admin(&auth_user)?;

    let policy = state.config().grading.policy();
    let results = GradeService::aggregate(state.scores(), &payload.student_ids, &policy).await?;

    Ok(Json(AggregateResponse { results }))
}

/// Grade export table
pub async fn grade_table(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<GradeTableResponse>> {
    require_admin(&auth_user)?;

    let policy = state.config().grading.policy();
    let table = GradeService::grade_table(state.db(), state.scores(), &policy).await?;

    Ok(Json(table))
}
