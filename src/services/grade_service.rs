//! Grade service
//!
//! Every grade view fetches its data once through a [`ScoreSource`] and then
//! builds its response from the fetched rows with the pure aggregator.

use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{AVERAGE_DECIMALS, MAX_AGGREGATE_STUDENTS, export_columns},
    error::{AppError, AppResult},
    grading::{
        AggregateResult, GradeError, GradeOutcome, GradingPolicy, ScoreSource, aggregate_fetched,
        load_and_aggregate, round_average,
    },
    handlers::grades::response::{
        AggregateResultResponse, ExamDetail, GradeReportResponse, GradeStatus, GradeTableResponse,
        GradeTableRow, StudentSummary,
    },
    models::{Exam, Score, User},
    services::StudentService,
};

/// Grade service for business logic
pub struct GradeService;

impl GradeService {
    /// Grade report of a single student
    pub async fn report<S>(
        source: &S,
        student: &User,
        policy: &GradingPolicy,
    ) -> AppResult<GradeReportResponse>
    where
        S: ScoreSource + ?Sized,
    {
        let scores = source.fetch_scores(&[student.id]).await?;
        let exams = source.fetch_exams().await?;

        Ok(build_report(student, &exams, &scores, policy)?)
    }

    /// Aggregate many students at once, in request order
    pub async fn aggregate<S>(
        source: &S,
        student_ids: &[Uuid],
        policy: &GradingPolicy,
    ) -> AppResult<Vec<AggregateResultResponse>>
    where
        S: ScoreSource + ?Sized,
    {
        if student_ids.len() > MAX_AGGREGATE_STUDENTS {
            return Err(AppError::Validation(format!(
                "At most {} students per request",
                MAX_AGGREGATE_STUDENTS
            )));
        }

        let requested: HashSet<Uuid> = student_ids.iter().copied().collect();
        let results = load_and_aggregate(source, &requested, policy).await?;

        let mut seen = HashSet::with_capacity(requested.len());
        Ok(student_ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| results.get(id))
            .map(AggregateResultResponse::from)
            .collect())
    }

    /// Grade export table for every student
    pub async fn grade_table<S>(
        pool: &PgPool,
        source: &S,
        policy: &GradingPolicy,
    ) -> AppResult<GradeTableResponse>
    where
        S: ScoreSource + ?Sized,
    {
        let students = StudentService::list_students(pool).await?;
        let exams = source.fetch_exams().await?;

        let scores = if students.is_empty() {
            Vec::new()
        } else {
            let ids: Vec<Uuid> = students.iter().map(|s| s.id).collect();
            source.fetch_scores(&ids).await?
        };

        Ok(build_table(&students, &exams, &scores, policy)?)
    }
}

/// Build a report from already-fetched rows
pub fn build_report(
    student: &User,
    exams: &[Exam],
    scores: &[Score],
    policy: &GradingPolicy,
) -> Result<GradeReportResponse, GradeError> {
    let own_scores: HashMap<Uuid, f64> = scores
        .iter()
        .filter(|s| s.student_id == student.id)
        .map(|s| (s.exam_id, s.value))
        .collect();

    let result = single_result(student.id, exams, scores, policy)?;

    let details = exams
        .iter()
        .map(|exam| ExamDetail {
            exam_id: exam.id,
            exam_name: exam.name.clone(),
            is_mandatory: exam.is_mandatory,
            score: own_scores.get(&exam.id).copied(),
            included: result.is_included(&exam.id),
        })
        .collect();

    let (status, average) = status_and_average(&result);

    Ok(GradeReportResponse {
        student: StudentSummary::from(student),
        status,
        average,
        limit: policy.limit,
        included_count: result.included_count(),
        valid_exam_count: own_scores.values().filter(|v| **v > 0.0).count(),
        details,
    })
}

/// Build the export table from already-fetched rows
///
/// Columns are seat, name, average and then one column per exam. Rows keep
/// the order of `students`.
pub fn build_table(
    students: &[User],
    exams: &[Exam],
    scores: &[Score],
    policy: &GradingPolicy,
) -> Result<GradeTableResponse, GradeError> {
    let ids: HashSet<Uuid> = students.iter().map(|s| s.id).collect();
    let results = aggregate_fetched(exams, scores, &ids, policy)?;

    let cells: HashMap<(Uuid, Uuid), f64> = scores
        .iter()
        .map(|s| ((s.student_id, s.exam_id), s.value))
        .collect();

    let mut columns = vec![
        export_columns::SEAT_NUMBER.to_string(),
        export_columns::NAME.to_string(),
        format!("Top {} Avg", policy.limit),
    ];
    columns.extend(exams.iter().map(|e| e.name.clone()));

    let rows = students
        .iter()
        .map(|student| GradeTableRow {
            student_id: student.id,
            seat_number: student.seat_number.clone(),
            name: student.name.clone(),
            average: results
                .get(&student.id)
                .and_then(AggregateResult::average)
                .map(|avg| round_average(avg, AVERAGE_DECIMALS)),
            scores: exams
                .iter()
                .map(|exam| cells.get(&(student.id, exam.id)).copied())
                .collect(),
        })
        .collect();

    Ok(GradeTableResponse {
        columns,
        exam_ids: exams.iter().map(|e| e.id).collect(),
        rows,
    })
}

fn single_result(
    student_id: Uuid,
    exams: &[Exam],
    scores: &[Score],
    policy: &GradingPolicy,
) -> Result<AggregateResult, GradeError> {
    let mut results = aggregate_fetched(exams, scores, &HashSet::from([student_id]), policy)?;
    Ok(results
        .remove(&student_id)
        .unwrap_or(AggregateResult {
            student_id,
            outcome: GradeOutcome::NoData,
        }))
}

fn status_and_average(result: &AggregateResult) -> (GradeStatus, Option<f64>) {
    match result.average() {
        Some(avg) => (GradeStatus::Graded, Some(round_average(avg, AVERAGE_DECIMALS))),
        None => (GradeStatus::NoData, None),
    }
}
