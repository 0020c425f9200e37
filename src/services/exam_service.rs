//! Exam service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::ExamRepository,
    error::{AppError, AppResult},
    models::Exam,
    utils::validate_exam_name,
};

/// Exam service for business logic
pub struct ExamService;

impl ExamService {
    /// List all exams in display order
    pub async fn list_exams(pool: &PgPool) -> AppResult<Vec<Exam>> {
        ExamRepository::list(pool).await
    }

    /// Create an optional exam. An existing exam of that name is returned as is.
    pub async fn create_exam(pool: &PgPool, name: &str) -> AppResult<(Exam, bool)> {
        let name = validate_exam_name(name).map_err(|e| AppError::Validation(e.to_string()))?;
        let (exam, created) = ExamRepository::find_or_create(pool, &name).await?;

        if created {
            tracing::info!(exam_id = %exam.id, name = %exam.name, "Exam created");
        }

        Ok((exam, created))
    }

    /// Rename an exam and/or change whether it is mandatory
    pub async fn update_exam(
        pool: &PgPool,
        id: &Uuid,
        name: Option<&str>,
        is_mandatory: Option<bool>,
    ) -> AppResult<Exam> {
        let name = name
            .map(validate_exam_name)
            .transpose()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        ExamRepository::update(pool, id, name.as_deref(), is_mandatory)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Exam not found".to_string()),
                AppError::AlreadyExists(_) => {
                    AppError::AlreadyExists("Another exam already has this name".to_string())
                }
                other => other,
            })
    }

    /// Replace the set of mandatory exams
    pub async fn set_mandatory_exams(pool: &PgPool, ids: &[Uuid]) -> AppResult<Vec<Exam>> {
        let marked = ExamRepository::set_mandatory(pool, ids).await?;
        if marked as usize != ids.len() {
            tracing::warn!(
                requested = ids.len(),
                marked,
                "Some mandatory exam ids did not match an exam"
            );
        }

        ExamRepository::list(pool).await
    }

    /// Delete an exam and all of its scores
    pub async fn delete_exam(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        if !ExamRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("Exam not found".to_string()));
        }

        tracing::info!(exam_id = %id, "Exam deleted");
        Ok(())
    }
}
