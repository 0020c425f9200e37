//! Bulk grade loading
//!
//! Grades for many students are computed from two fetches: every score of the
//! requested students and the exam metadata. Scores are grouped in memory and
//! each group goes through the pure aggregator.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Exam, Score},
};

use super::aggregator::{Aggregate, GradeError, GradingPolicy, ScoreEntry, compute_with};

/// Data-access collaborator of the bulk loader
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreSource: Send + Sync {
    /// All scores belonging to any of the given students
    async fn fetch_scores(&self, student_ids: &[Uuid]) -> AppResult<Vec<Score>>;

    /// All exams, mandatory first and then by name
    async fn fetch_exams(&self) -> AppResult<Vec<Exam>>;
}

/// Grade of one student
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GradeOutcome {
    Graded(Aggregate),
    /// Nothing to average. Never reported as a zero average.
    NoData,
}

/// Grade outcome keyed to its student
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub student_id: Uuid,
    #[serde(flatten)]
    pub outcome: GradeOutcome,
}

impl AggregateResult {
    pub fn average(&self) -> Option<f64> {
        match &self.outcome {
            GradeOutcome::Graded(aggregate) => Some(aggregate.average),
            GradeOutcome::NoData => None,
        }
    }

    pub fn is_included(&self, exam_id: &Uuid) -> bool {
        match &self.outcome {
            GradeOutcome::Graded(aggregate) => aggregate.contributing_exam_ids.contains(exam_id),
            GradeOutcome::NoData => false,
        }
    }

    pub fn included_count(&self) -> usize {
        match &self.outcome {
            GradeOutcome::Graded(aggregate) => aggregate.included_count(),
            GradeOutcome::NoData => 0,
        }
    }
}

/// Fetch everything needed for `student_ids` and aggregate each student
///
/// Issues two fetches however many students are requested, and none for an
/// empty set. Fetch errors are returned unchanged.
pub async fn load_and_aggregate<S>(
    source: &S,
    student_ids: &HashSet<Uuid>,
    policy: &GradingPolicy,
) -> AppResult<HashMap<Uuid, AggregateResult>>
where
    S: ScoreSource + ?Sized,
{
    if student_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let ids: Vec<Uuid> = student_ids.iter().copied().collect();
    let scores = source.fetch_scores(&ids).await?;
    let exams = source.fetch_exams().await?;

    tracing::debug!(
        students = ids.len(),
        scores = scores.len(),
        exams = exams.len(),
        "Fetched grade data"
    );

    Ok(aggregate_fetched(&exams, &scores, student_ids, policy)?)
}

/// Aggregate already-fetched data for every requested student
///
/// Students without anything to average get [`GradeOutcome::NoData`], also
/// when mandatory exams are zero-filled. A limit below the mandatory count
/// fails the whole batch.
pub fn aggregate_fetched(
    exams: &[Exam],
    scores: &[Score],
    student_ids: &HashSet<Uuid>,
    policy: &GradingPolicy,
) -> Result<HashMap<Uuid, AggregateResult>, GradeError> {
    let known_exams: HashSet<Uuid> = exams.iter().map(|e| e.id).collect();

    let mut by_student: HashMap<Uuid, HashMap<Uuid, f64>> = HashMap::new();
    for score in scores {
        if !student_ids.contains(&score.student_id) {
            continue;
        }
        if !known_exams.contains(&score.exam_id) {
            tracing::warn!(
                student_id = %score.student_id,
                exam_id = %score.exam_id,
                "Skipping score for unknown exam"
            );
            continue;
        }
        by_student
            .entry(score.student_id)
            .or_default()
            .insert(score.exam_id, score.value);
    }

    let mut results = HashMap::with_capacity(student_ids.len());

    for student_id in student_ids {
        // Zero-fill only pads students that have at least one real score.
        let outcome = match by_student.get(student_id) {
            None => GradeOutcome::NoData,
            Some(student_scores) => {
                let entries = entries_for_student(exams, student_scores, policy);
                match compute_with(&entries, policy) {
                    Ok(aggregate) => GradeOutcome::Graded(aggregate),
                    Err(GradeError::NoData) => GradeOutcome::NoData,
                    Err(e) => return Err(e),
                }
            }
        };

        results.insert(
            *student_id,
            AggregateResult {
                student_id: *student_id,
                outcome,
            },
        );
    }

    Ok(results)
}

/// Aggregator input for one student, in exam order
pub fn entries_for_student(
    exams: &[Exam],
    student_scores: &HashMap<Uuid, f64>,
    policy: &GradingPolicy,
) -> Vec<ScoreEntry> {
    exams
        .iter()
        .filter_map(|exam| match student_scores.get(&exam.id) {
            Some(value) => Some(ScoreEntry::new(exam.id, *value, exam.is_mandatory)),
            None if exam.is_mandatory && policy.zero_fill_mandatory => {
                Some(ScoreEntry::new(exam.id, 0.0, true))
            }
            None => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::always;

    use crate::error::AppError;

    fn exam(name: &str, is_mandatory: bool) -> Exam {
        Exam {
            id: Uuid::new_v4(),
            name: name.to_string(),
            is_mandatory,
            created_at: Utc::now(),
        }
    }

    fn score(student_id: Uuid, exam: &Exam, value: f64) -> Score {
        Score {
            id: Uuid::new_v4(),
            student_id,
            exam_id: exam.id,
            value,
            updated_at: Utc::now(),
        }
    }

    /// Mock that expects exactly one call of each fetch
    fn single_fetch_source(exams: Vec<Exam>, scores: Vec<Score>) -> MockScoreSource {
        let mut source = MockScoreSource::new();
        source
            .expect_fetch_scores()
            .with(always())
            .times(1)
            .returning(move |_| Ok(scores.clone()));
        source
            .expect_fetch_exams()
            .times(1)
            .returning(move || Ok(exams.clone()));
        source
    }

    #[tokio::test]
    async fn test_fetch_count_independent_of_student_count() {
        let exams = vec![exam("math", true), exam("science", false)];

        for count in [1usize, 1000] {
            let students: HashSet<Uuid> = (0..count).map(|_| Uuid::new_v4()).collect();
            let scores: Vec<Score> = students
                .iter()
                .flat_map(|s| [score(*s, &exams[0], 80.0), score(*s, &exams[1], 60.0)])
                .collect();

            let source = single_fetch_source(exams.clone(), scores);
            let results = load_and_aggregate(&source, &students, &GradingPolicy::default())
                .await
                .unwrap();

            assert_eq!(results.len(), count);
            assert!(results.values().all(|r| r.average() == Some(70.0)));
        }
    }

    #[tokio::test]
    async fn test_empty_request_fetches_nothing() {
        let source = MockScoreSource::new();
        let results = load_and_aggregate(&source, &HashSet::new(), &GradingPolicy::default())
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_student_without_scores_is_no_data() {
        let exams = vec![exam("math", false)];
        let graded = Uuid::new_v4();
        let empty = Uuid::new_v4();
        let scores = vec![score(graded, &exams[0], 90.0)];

        let source = single_fetch_source(exams, scores);
        let results = load_and_aggregate(
            &source,
            &HashSet::from([graded, empty]),
            &GradingPolicy::default(),
        )
        .await
        .unwrap();

        assert_eq!(results[&graded].average(), Some(90.0));
        assert_eq!(results[&empty].outcome, GradeOutcome::NoData);
        assert_eq!(results[&empty].average(), None);
    }

    #[tokio::test]
    async fn test_fetch_errors_propagate() {
        let mut source = MockScoreSource::new();
        source
            .expect_fetch_scores()
            .times(1)
            .returning(|_| Err(AppError::Database("connection reset".to_string())));
        source.expect_fetch_exams().never();

        let err = load_and_aggregate(
            &source,
            &HashSet::from([Uuid::new_v4()]),
            &GradingPolicy::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Database(msg) if msg == "connection reset"));
    }

    #[tokio::test]
    async fn test_limit_below_mandatory_fails_batch() {
        let exams = vec![exam("a", true), exam("b", true), exam("c", true)];
        let student = Uuid::new_v4();
        let scores = exams.iter().map(|e| score(student, e, 50.0)).collect();

        let source = single_fetch_source(exams, scores);
        let err = load_and_aggregate(
            &source,
            &HashSet::from([student]),
            &GradingPolicy::with_limit(2),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_zero_fill_mandatory() {
        let exams = vec![exam("math", true), exam("art", false)];
        let student = Uuid::new_v4();
        let scores = vec![score(student, &exams[1], 90.0)];
        let ids = HashSet::from([student]);

        let plain = aggregate_fetched(&exams, &scores, &ids, &GradingPolicy::default()).unwrap();
        assert_eq!(plain[&student].average(), Some(90.0));
        assert!(!plain[&student].is_included(&exams[0].id));

        let policy = GradingPolicy {
            zero_fill_mandatory: true,
            ..GradingPolicy::default()
        };
        let filled = aggregate_fetched(&exams, &scores, &ids, &policy).unwrap();
        assert_eq!(filled[&student].average(), Some(45.0));
        assert!(filled[&student].is_included(&exams[0].id));
    }

    #[test]
    fn test_zero_fill_leaves_students_without_scores_ungraded() {
        let exams = vec![exam("math", true), exam("english", true), exam("art", false)];
        let scored = Uuid::new_v4();
        let blank = Uuid::new_v4();
        let scores = vec![score(scored, &exams[2], 80.0)];
        let policy = GradingPolicy {
            zero_fill_mandatory: true,
            ..GradingPolicy::default()
        };

        let results =
            aggregate_fetched(&exams, &scores, &HashSet::from([scored, blank]), &policy).unwrap();

        assert_eq!(results[&blank].outcome, GradeOutcome::NoData);
        assert_eq!(results[&blank].average(), None);
        assert_eq!(results[&blank].included_count(), 0);
        assert!(results[&scored].average().is_some_and(|avg| (avg - 80.0 / 3.0).abs() < 1e-9));
        assert_eq!(results[&scored].included_count(), 3);
    }

    #[test]
    fn test_scores_for_unknown_exams_or_students_are_ignored() {
        let exams = vec![exam("math", false)];
        let orphan_exam = exam("deleted", false);
        let student = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let scores = vec![
            score(student, &exams[0], 60.0),
            score(student, &orphan_exam, 100.0),
            score(stranger, &exams[0], 10.0),
        ];

        let results = aggregate_fetched(
            &exams,
            &scores,
            &HashSet::from([student]),
            &GradingPolicy::default(),
        )
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[&student].average(), Some(60.0));
        assert_eq!(results[&student].included_count(), 1);
    }

    #[test]
    fn test_outcome_serialization() {
        let student = Uuid::new_v4();
        let result = AggregateResult {
            student_id: student,
            outcome: GradeOutcome::NoData,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "no_data");
        assert_eq!(json["student_id"], student.to_string());
    }
}
