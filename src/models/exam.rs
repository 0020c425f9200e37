//! Exam model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Exam database model
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Exam {
    pub id: Uuid,
    pub name: String,
    /// Mandatory exams always count towards the average
    pub is_mandatory: bool,
    pub created_at: DateTime<Utc>,
}
