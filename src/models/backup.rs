//! Backup document model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Exam, Score, User};

/// Full database dump exchanged by backup and restore
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    pub format: String,
    pub version: u32,
    pub app_version: String,
    pub exported_at: DateTime<Utc>,
    /// Hex SHA-256 of the serialized `data`
    pub checksum: String,
    pub data: BackupData,
}

/// Table contents of a backup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub exams: Vec<Exam>,
    #[serde(default)]
    pub scores: Vec<Score>,
}
