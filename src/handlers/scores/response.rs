//! Score response DTOs

use serde::Serialize;

/// Result of a score batch
#[derive(Debug, Serialize)]
pub struct UpdateScoresResponse {
    pub requested: usize,
    /// Rows inserted or whose value actually changed
    pub changed: u32,
}
