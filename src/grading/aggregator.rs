//! Top-N grade aggregation
//!
//! Mandatory exams always count. The remaining slots up to the limit are filled
//! with the student's best optional scores, and the average is taken over
//! everything that was included.

use std::collections::BTreeSet;

use serde::Serialize;
use uuid::Uuid;

use crate::constants::DEFAULT_GRADING_TOP_N;

/// One score as seen by the aggregator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEntry {
    pub exam_id: Uuid,
    pub value: f64,
    pub is_mandatory: bool,
}

impl ScoreEntry {
    pub fn new(exam_id: Uuid, value: f64, is_mandatory: bool) -> Self {
        Self {
            exam_id,
            value,
            is_mandatory,
        }
    }
}

/// How averages are formed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradingPolicy {
    /// Maximum number of scores that count
    pub limit: usize,
    /// Divide by `limit` when fewer scores are included, so empty slots count as zero
    pub pad_to_limit: bool,
    /// Feed a missing mandatory score to the aggregator as zero
    pub zero_fill_mandatory: bool,
}

impl GradingPolicy {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            limit: DEFAULT_GRADING_TOP_N,
            pad_to_limit: false,
            zero_fill_mandatory: false,
        }
    }
}

/// Result of aggregating one student's scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub average: f64,
    pub total: f64,
    pub contributing_exam_ids: BTreeSet<Uuid>,
}

impl Aggregate {
    /// Number of scores that were included
    pub fn included_count(&self) -> usize {
        self.contributing_exam_ids.len()
    }
}

/// Grade aggregation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GradeError {
    #[error("limit {limit} is smaller than the {mandatory} mandatory exams")]
    LimitBelowMandatory { limit: usize, mandatory: usize },

    #[error("no scores to average")]
    NoData,
}

/// Aggregate with the default policy for `limit`
pub fn compute(scores: &[ScoreEntry], limit: usize) -> Result<Aggregate, GradeError> {
    compute_with(scores, &GradingPolicy::with_limit(limit))
}

/// Aggregate scores under an explicit policy
///
/// Optional scores are ordered by value with a stable sort, so equal values
/// keep their input order at the cutoff.
pub fn compute_with(scores: &[ScoreEntry], policy: &GradingPolicy) -> Result<Aggregate, GradeError> {
    let (mandatory, mut optional): (Vec<&ScoreEntry>, Vec<&ScoreEntry>) =
        scores.iter().partition(|s| s.is_mandatory);

    if policy.limit < mandatory.len() {
        return Err(GradeError::LimitBelowMandatory {
            limit: policy.limit,
            mandatory: mandatory.len(),
        });
    }

    let open_slots = policy.limit - mandatory.len();
    optional.sort_by(|a, b| b.value.total_cmp(&a.value));

    let included: Vec<&ScoreEntry> = mandatory
        .into_iter()
        .chain(optional.into_iter().take(open_slots))
        .collect();

    if included.is_empty() {
        return Err(GradeError::NoData);
    }

    let total: f64 = included.iter().map(|s| s.value).sum();
    let divisor = if policy.pad_to_limit {
        included.len().max(policy.limit)
    } else {
        included.len()
    };

    Ok(Aggregate {
        average: total / divisor as f64,
        total,
        contributing_exam_ids: included.iter().map(|s| s.exam_id).collect(),
    })
}

/// Round an average for display
pub fn round_average(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
