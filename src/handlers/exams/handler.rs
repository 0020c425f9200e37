//! Exam handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::require_admin,
    middleware::auth::AuthenticatedUser,
    services::ExamService,
    state::AppState,
};

use super::{
    request::{CreateExamRequest, SetMandatoryRequest, UpdateExamRequest},
    response::{ExamResponse, ExamsListResponse},
};

/// List exams, mandatory first
pub async fn list_exams(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ExamsListResponse>> {
    require_admin(&auth_user)?;

    let exams = ExamService::list_exams(state.db()).await?;
    Ok(Json(exams.into()))
}

/// Create an exam, or return the one with the same name
pub async fn create_exam(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateExamRequest>,
) -> AppResult<(StatusCode, Json<ExamResponse>)> {
    require_admin(&auth_user)?;
    payload.validate()?;

    let (exam, created) = ExamService::create_exam(state.db(), &payload.name).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(exam.into())))
}

/// Rename an exam or flip its mandatory flag
pub async fn update_exam(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateExamRequest>,
) -> AppResult<Json<ExamResponse>> {
    require_admin(&auth_user)?;
    payload.validate()?;

    let exam = ExamService::update_exam(
        state.db(),
        &id,
        payload.name.as_deref(),
        payload.is_mandatory,
    )
    .await?;

    Ok(Json(exam.into()))
}

/// Replace the mandatory set
pub async fn set_mandatory_exams(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<SetMandatoryRequest>,
) -> AppResult<Json<ExamsListResponse>> {
    require_admin(&auth_user)?;

    let exams = ExamService::set_mandatory_exams(state.db(), &payload.exam_ids).await?;
    Ok(Json(exams.into()))
}

/// Delete an exam with its scores
pub async fn delete_exam(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&auth_user)?;

    ExamService::delete_exam(state.db(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
