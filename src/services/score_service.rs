//! Score service

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{ExamRepository, ScoreRepository, UserRepository},
    error::{AppError, AppResult},
    models::{Exam, Score, User},
    services::StudentService,
    utils::{
        validate_exam_name,
        validation::{parse_score_cell, parse_seat_cell, validate_score},
    },
};

/// A single score change
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScoreUpdate {
    pub student_id: Uuid,
    pub exam_id: Uuid,
    pub value: f64,
}

/// Rows extracted from a score spreadsheet
///
/// The first header is the seat column, every other header names an exam.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// Outcome counts of a score sheet import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SheetImportStats {
    pub created_exams: u32,
    pub processed_scores: u32,
    pub errors: u32,
}

/// Every student, exam and score
#[derive(Debug, Clone, Serialize)]
pub struct ScoreMatrix {
    pub students: Vec<User>,
    pub exams: Vec<Exam>,
    pub scores: Vec<Score>,
}

/// Score service for business logic
pub struct ScoreService;

impl ScoreService {
    /// Load the full score matrix in three queries
    pub async fn matrix(pool: &PgPool) -> AppResult<ScoreMatrix> {
        Ok(ScoreMatrix {
            students: StudentService::list_students(pool).await?,
            exams: ExamRepository::list(pool).await?,
            scores: ScoreRepository::list_all(pool).await?,
        })
    }

    /// Apply score changes atomically
    ///
    /// Returns how many scores were inserted or actually changed.
    pub async fn bulk_update(pool: &PgPool, updates: &[ScoreUpdate]) -> AppResult<u32> {
        for update in updates {
            validate_score(update.value).map_err(|e| AppError::Validation(e.to_string()))?;
        }

        let mut tx = pool.begin().await?;
        let mut changed = 0;

        for update in updates {
            if ScoreRepository::upsert(&mut *tx, &update.student_id, &update.exam_id, update.value)
                .await?
            {
                changed += 1;
            }
        }

        tx.commit().await?;
        tracing::info!(requested = updates.len(), changed, "Scores updated");

        Ok(changed)
    }

    /// Import a score sheet
    ///
    /// Unknown exam columns are created as optional exams. Cells without a
    /// numeric value are skipped; rows whose seat matches no student count as
    /// errors.
    pub async fn import_sheet(pool: &PgPool, sheet: &ScoreSheet) -> AppResult<SheetImportStats> {
        let Some((_, exam_headers)) = sheet.headers.split_first() else {
            return Err(AppError::InvalidInput(
                "Sheet needs a seat number column".to_string(),
            ));
        };

        let mut stats = SheetImportStats::default();

        let seats: Vec<String> = sheet
            .rows
            .iter()
            .filter_map(|row| row.first().and_then(parse_seat_cell))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let students: HashMap<String, Uuid> = UserRepository::find_students_by_seats(pool, &seats)
            .await?
            .into_iter()
            .filter_map(|u| u.seat_number.map(|seat| (seat, u.id)))
            .collect();

        let mut tx = pool.begin().await?;

        // column index -> exam id
        let mut columns: Vec<(usize, Uuid)> = Vec::with_capacity(exam_headers.len());
        for (offset, header) in exam_headers.iter().enumerate() {
            let Ok(name) = validate_exam_name(header) else {
                tracing::warn!(column = offset + 2, "Skipping column without a valid exam name");
                continue;
            };
            let (exam, created) = ExamRepository::find_or_create(&mut *tx, &name).await?;
            if created {
                stats.created_exams += 1;
            }
            columns.push((offset + 1, exam.id));
        }

        for (index, row) in sheet.rows.iter().enumerate() {
            let student_id = row
                .first()
                .and_then(parse_seat_cell)
                .and_then(|seat| students.get(&seat).copied());

            let Some(student_id) = student_id else {
                tracing::warn!(row = index + 1, "No student with this seat number");
                stats.errors += 1;
                continue;
            };

            for (column, exam_id) in &columns {
                let Some(value) = row.get(*column).and_then(parse_score_cell) else {
                    continue;
                };
                ScoreRepository::upsert(&mut *tx, &student_id, exam_id, value).await?;
                stats.processed_scores += 1;
            }
        }

        tx.commit().await?;

        tracing::info!(
            created_exams = stats.created_exams,
            processed_scores = stats.processed_scores,
            errors = stats.errors,
            "Score sheet imported"
        );

        Ok(stats)
    }
}
