//! Backup repository
//!
//! Whole-database reads and the transactional replace used by restore.

use sqlx::PgPool;

use crate::{error::AppResult, models::BackupData};

use super::{ExamRepository, ScoreRepository, UserRepository};

/// Row counts written by a restore
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreCounts {
    pub users: usize,
    pub exams: usize,
    pub scores: usize,
}

/// Repository for whole-database backup operations
pub struct BackupRepository;

impl BackupRepository {
    /// Read every table
    pub async fn dump(pool: &PgPool) -> AppResult<BackupData> {
        Ok(BackupData {
            users: UserRepository::list_all(pool).await?,
            exams: ExamRepository::list(pool).await?,
            scores: ScoreRepository::list_all(pool).await?,
        })
    }

    /// Delete everything and insert `data` with its ids, all in one transaction
    pub async fn replace_all(pool: &PgPool, data: &BackupData) -> AppResult<RestoreCounts> {
        let mut tx = pool.begin().await?;

        // scores go first through the cascade, but be explicit
        sqlx::query(r#"DELETE FROM scores"#).execute(&mut *tx).await?;
        sqlx::query(r#"DELETE FROM users"#).execute(&mut *tx).await?;
        sqlx::query(r#"DELETE FROM exams"#).execute(&mut *tx).await?;

        for user in &data.users {
            sqlx::query(
                r#"
                INSERT INTO users (id, email, name, seat_number, role, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.seat_number)
            .bind(&user.role)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for exam in &data.exams {
            sqlx::query(
                r#"
                INSERT INTO exams (id, name, is_mandatory, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(exam.id)
            .bind(&exam.name)
            .bind(exam.is_mandatory)
            .bind(exam.created_at)
            .execute(&mut *tx)
            .await?;
        }

        for score in &data.scores {
            sqlx::query(
                r#"
                INSERT INTO scores (id, student_id, exam_id, value, updated_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(score.id)
            .bind(score.student_id)
            .bind(score.exam_id)
            .bind(score.value)
            .bind(score.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(RestoreCounts {
            users: data.users.len(),
            exams: data.exams.len(),
            scores: data.scores.len(),
        })
    }
}
