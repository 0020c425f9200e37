//! Exam repository

use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::{error::AppResult, models::Exam};

/// Exam row plus whether this call inserted it
#[derive(Debug, FromRow)]
struct ExamUpsertRow {
    #[sqlx(flatten)]
    exam: Exam,
    created: bool,
}

/// Repository for exam database operations
pub struct ExamRepository;

impl ExamRepository {
    /// Find an exam by name, creating it as optional when missing
    ///
    /// Returns the exam and `true` when this call created it. A concurrent
    /// insert of the same name blocks on the conflicting row and then returns it.
    pub async fn find_or_create<'e, E: PgExecutor<'e>>(
        executor: E,
        name: &str,
    ) -> AppResult<(Exam, bool)> {
        let row = sqlx::query_as::<_, ExamUpsertRow>(
            r#"
            INSERT INTO exams (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING *, (xmax = 0) AS created
            "#,
        )
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok((row.exam, row.created))
    }

    /// List all exams, mandatory first and then by name
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Exam>> {
        let exams = sqlx::query_as::<_, Exam>(
            r#"SELECT * FROM exams ORDER BY is_mandatory DESC, name ASC"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(exams)
    }

    /// Update name and/or mandatory flag
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        name: Option<&str>,
        is_mandatory: Option<bool>,
    ) -> AppResult<Exam> {
        let exam = sqlx::query_as::<_, Exam>(
            r#"
            UPDATE exams
            SET
                name = COALESCE($2, name),
                is_mandatory = COALESCE($3, is_mandatory)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(is_mandatory)
        .fetch_one(pool)
        .await?;

        Ok(exam)
    }

    /// Make exactly the given exams mandatory. Returns the number of exams marked.
    pub async fn set_mandatory(pool: &PgPool, ids: &[Uuid]) -> AppResult<i64> {
        let marked: i64 = sqlx::query_scalar(
            r#"
            WITH updated AS (
                UPDATE exams
                SET is_mandatory = (id = ANY($1))
                RETURNING is_mandatory
            )
            SELECT COUNT(*) FROM updated WHERE is_mandatory
            "#,
        )
        .bind(ids)
        .fetch_one(pool)
        .await?;

        Ok(marked)
    }

    /// Delete an exam and, through the foreign key, its scores
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM exams WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
