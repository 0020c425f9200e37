//! Score repository

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{error::AppResult, models::Score};

/// Repository for score database operations
pub struct ScoreRepository;

impl ScoreRepository {
    /// All scores of any of the given students, in a single query
    pub async fn find_by_students(pool: &PgPool, student_ids: &[Uuid]) -> AppResult<Vec<Score>> {
        let scores = sqlx::query_as::<_, Score>(
            r#"SELECT * FROM scores WHERE student_id = ANY($1)"#,
        )
        .bind(student_ids)
        .fetch_all(pool)
        .await?;

        Ok(scores)
    }

    /// Every score
    pub async fn list_all(pool: &PgPool) -> AppResult<Vec<Score>> {
        let scores = sqlx::query_as::<_, Score>(r#"SELECT * FROM scores"#)
            .fetch_all(pool)
            .await?;

        Ok(scores)
    }

    /// Insert or update a score
    ///
    /// Returns `true` when a row was inserted or its value actually changed.
    pub async fn upsert<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: &Uuid,
        exam_id: &Uuid,
        value: f64,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO scores (student_id, exam_id, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (student_id, exam_id) DO UPDATE
            SET value = EXCLUDED.value, updated_at = NOW()
            WHERE scores.value IS DISTINCT FROM EXCLUDED.value
            "#,
        )
        .bind(student_id)
        .bind(exam_id)
        .bind(value)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
