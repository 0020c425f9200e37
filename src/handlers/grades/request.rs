//! Grade request DTOs

use serde::Deserialize;
use uuid::Uuid;

/// Bulk aggregate request
#[derive(Debug, Deserialize)]
pub struct AggregateRequest {
    pub student_ids: Vec<Uuid>,
}
