//! Grade response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::{
    constants::AVERAGE_DECIMALS,
    grading::{AggregateResult, GradeOutcome, round_average},
    models::User,
};

/// Whether an average could be formed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeStatus {
    Graded,
    NoData,
}

/// Student identity shown next to grades
#[derive(Debug, Clone, Serialize)]
pub struct StudentSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub seat_number: Option<String>,
}

impl From<&User> for StudentSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            seat_number: user.seat_number.clone(),
        }
    }
}

/// One exam line of a grade report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamDetail {
    pub exam_id: Uuid,
    pub exam_name: String,
    pub is_mandatory: bool,
    /// `None` when the student has no score for the exam
    pub score: Option<f64>,
    pub included: bool,
}

/// Full grade report of one student
#[derive(Debug, Clone, Serialize)]
pub struct GradeReportResponse {
    pub student: StudentSummary,
    pub status: GradeStatus,
    /// Rounded for display, absent when there is no data
    pub average: Option<f64>,
    pub limit: usize,
    pub included_count: usize,
    /// Scores above zero
    pub valid_exam_count: usize,
    pub details: Vec<ExamDetail>,
}

/// Aggregate of one student as returned by the bulk endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResultResponse {
    pub student_id: Uuid,
    pub status: GradeStatus,
    pub average: Option<f64>,
    pub contributing_exam_ids: Vec<Uuid>,
}

impl From<&AggregateResult> for AggregateResultResponse {
    fn from(result: &AggregateResult) -> Self {
        let (status, average, contributing_exam_ids) = match &result.outcome {
            GradeOutcome::Graded(aggregate) => (
                GradeStatus::Graded,
                Some(round_average(aggregate.average, AVERAGE_DECIMALS)),
                aggregate.contributing_exam_ids.iter().copied().collect(),
            ),
            GradeOutcome::NoData => (GradeStatus::NoData, None, Vec::new()),
        };

        Self {
            student_id: result.student_id,
            status,
            average,
            contributing_exam_ids,
        }
    }
}

/// Bulk aggregate response
#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub results: Vec<AggregateResultResponse>,
}

/// One row of the grade export table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeTableRow {
    pub student_id: Uuid,
    pub seat_number: Option<String>,
    pub name: String,
    pub average: Option<f64>,
    /// One cell per exam column, in column order
    pub scores: Vec<Option<f64>>,
}

/// Grade export table handed to spreadsheet writers
#[derive(Debug, Clone, Serialize)]
pub struct GradeTableResponse {
    pub columns: Vec<String>,
    pub exam_ids: Vec<Uuid>,
    pub rows: Vec<GradeTableRow>,
}
