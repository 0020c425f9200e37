//! Score model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Score database model. At most one per (student, exam).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Score {
    pub id: Uuid,
    pub student_id: Uuid,
    pub exam_id: Uuid,
    pub value: f64,
    pub updated_at: DateTime<Utc>,
}
