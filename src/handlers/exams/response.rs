//! Exam response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Exam;

/// Exam information
#[derive(Debug, Serialize)]
pub struct ExamResponse {
    pub id: Uuid,
    pub name: String,
    pub is_mandatory: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Exam> for ExamResponse {
    fn from(exam: Exam) -> Self {
        Self {
            id: exam.id,
            name: exam.name,
            is_mandatory: exam.is_mandatory,
            created_at: exam.created_at,
        }
    }
}

/// Exams in display order
#[derive(Debug, Serialize)]
pub struct ExamsListResponse {
    pub exams: Vec<ExamResponse>,
}

impl From<Vec<Exam>> for ExamsListResponse {
    fn from(exams: Vec<Exam>) -> Self {
        Self {
            exams: exams.into_iter().map(ExamResponse::from).collect(),
        }
    }
}
