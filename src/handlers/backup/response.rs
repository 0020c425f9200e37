//! Backup response DTOs

use serde::Serialize;

use crate::db::repositories::RestoreCounts;

/// Rows written by a restore
#[derive(Debug, Serialize)]
pub struct RestoreResponse {
    pub users: usize,
    pub exams: usize,
    pub scores: usize,
}

impl From<RestoreCounts> for RestoreResponse {
    fn from(counts: RestoreCounts) -> Self {
        Self {
            users: counts.users,
            exams: counts.exams,
            scores: counts.scores,
        }
    }
}
