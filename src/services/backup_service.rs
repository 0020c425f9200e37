//! Backup service
//!
//! Exports the whole database as one checksummed JSON document and restores
//! such a document in place of the current data.

use std::collections::HashSet;

use chrono::Utc;
use sqlx::PgPool;

use crate::{
    constants::{BACKUP_FORMAT, BACKUP_VERSION},
    db::repositories::{BackupRepository, RestoreCounts},
    error::{AppError, AppResult},
    models::{BackupData, BackupDocument},
    utils::{hash_bytes, validation::validate_role, verify_hash},
};

/// Backup service for business logic
pub struct BackupService;

impl BackupService {
    /// Dump every table into a backup document
    pub async fn export(pool: &PgPool) -> AppResult<BackupDocument> {
        let data = BackupRepository::dump(pool).await?;
        let document = build_document(data)?;

        tracing::info!(
            users = document.data.users.len(),
            exams = document.data.exams.len(),
            scores = document.data.scores.len(),
            "Backup exported"
        );

        Ok(document)
    }

    /// Replace the database with the contents of `document`
    ///
    /// Nothing is written unless the document passes every check.
    pub async fn restore(pool: &PgPool, document: &BackupDocument) -> AppResult<RestoreCounts> {
        check_document(document)?;

        let counts = BackupRepository::replace_all(pool, &document.data).await?;
        tracing::warn!(
            users = counts.users,
            exams = counts.exams,
            scores = counts.scores,
            exported_at = %document.exported_at,
            "Database restored from backup"
        );

        Ok(counts)
    }
}

/// Checksum of the serialized table data
pub fn checksum(data: &BackupData) -> AppResult<String> {
    let bytes = serde_json::to_vec(data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Backup serialization failed: {}", e)))?;
    Ok(hash_bytes(&bytes))
}

fn build_document(data: BackupData) -> AppResult<BackupDocument> {
    Ok(BackupDocument {
        format: BACKUP_FORMAT.to_string(),
        version: BACKUP_VERSION,
        app_version: env!("CARGO_PKG_VERSION").to_string(),
        exported_at: Utc::now(),
        checksum: checksum(&data)?,
        data,
    })
}

/// Validate a backup before it is allowed to replace anything
fn check_document(document: &BackupDocument) -> AppResult<()> {
    if document.format != BACKUP_FORMAT {
        return Err(AppError::InvalidInput(format!(
            "Unknown backup format '{}'",
            document.format
        )));
    }
    if document.version == 0 || document.version > BACKUP_VERSION {
        return Err(AppError::InvalidInput(format!(
            "Unsupported backup version {}",
            document.version
        )));
    }

    let bytes = serde_json::to_vec(&document.data)
        .map_err(|e| AppError::InvalidInput(format!("Unreadable backup data: {}", e)))?;
    if !verify_hash(&bytes, &document.checksum) {
        return Err(AppError::InvalidInput(
            "Backup checksum does not match its data".to_string(),
        ));
    }

    check_integrity(&document.data).map_err(AppError::InvalidInput)
}

fn check_integrity(data: &BackupData) -> Result<(), String> {
    for user in &data.users {
        validate_role(&user.role).map_err(|e| format!("User {}: {}", user.id, e))?;
    }

    let users: HashSet<_> = data.users.iter().map(|u| u.id).collect();
    let exams: HashSet<_> = data.exams.iter().map(|e| e.id).collect();

    if users.len() != data.users.len() || exams.len() != data.exams.len() {
        return Err("Backup contains duplicate ids".to_string());
    }

    let mut pairs = HashSet::with_capacity(data.scores.len());
    for score in &data.scores {
        if !users.contains(&score.student_id) {
            return Err(format!("Score {} references an unknown student", score.id));
        }
        if !exams.contains(&score.exam_id) {
            return Err(format!("Score {} references an unknown exam", score.id));
        }
        if !score.value.is_finite() {
            return Err(format!("Score {} is not a number", score.id));
        }
        if !pairs.insert((score.student_id, score.exam_id)) {
            return Err(format!("Score {} duplicates another score", score.id));
        }
    }

    Ok(())
}
