//! Student handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::MAX_IMPORT_ROWS,
    error::{AppError, AppResult},
    handlers::{auth::UserResponse, require_admin},
    middleware::auth::AuthenticatedUser,
    services::{StudentService, student_service::StudentImportStats},
    state::AppState,
};

use super::{
    request::{CreateStudentRequest, ImportStudentsRequest},
    response::StudentsListResponse,
};

/// List every student
pub async fn list_students(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<StudentsListResponse>> {
    require_admin(&auth_user)?;

    let students: Vec<UserResponse> = StudentService::list_students(state.db())
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(StudentsListResponse {
        total: students.len(),
        students,
    }))
}

/// Get one student
pub async fn get_student(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&auth_user)?;

    let student = StudentService::get_student(state.db(), &id).await?;
    Ok(Json(student.into()))
}

/// Register a single student
pub async fn create_student(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateStudentRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    require_admin(&auth_user)?;
    payload.validate()?;

    let student = StudentService::create_student(
        state.db(),
        &payload.email,
        &payload.name,
        &payload.seat_number,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(student.into())))
}

/// Import a roster
pub async fn import_students(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<ImportStudentsRequest>,
) -> AppResult<Json<StudentImportStats>> {
    require_admin(&auth_user)?;

    if payload.rows.len() > MAX_IMPORT_ROWS {
        return Err(AppError::Validation(format!(
            "At most {} rows per import",
            MAX_IMPORT_ROWS
        )));
    }

    let stats = StudentService::import_students(state.db(), &payload.rows).await?;
    Ok(Json(stats))
}
