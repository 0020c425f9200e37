//! PostgreSQL score source

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{ExamRepository, ScoreRepository},
    error::AppResult,
    models::{Exam, Score},
};

use super::loader::ScoreSource;

/// Score source reading straight from the database, one query per fetch
#[derive(Clone)]
pub struct PgScoreSource {
    pool: PgPool,
}

impl PgScoreSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreSource for PgScoreSource {
    async fn fetch_scores(&self, student_ids: &[Uuid]) -> AppResult<Vec<Score>> {
        ScoreRepository::find_by_students(&self.pool, student_ids).await
    }

    async fn fetch_exams(&self) -> AppResult<Vec<Exam>> {
        ExamRepository::list(&self.pool).await
    }
}
