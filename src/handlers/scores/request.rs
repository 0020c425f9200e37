//! Score request DTOs

use serde::Deserialize;

use crate::services::score_service::ScoreUpdate;

pub use crate::services::score_service::ScoreSheet;

/// Batch of score changes applied together
#[derive(Debug, Deserialize)]
pub struct UpdateScoresRequest {
    pub updates: Vec<ScoreUpdate>,
}
