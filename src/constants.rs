//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 12;

/// Header carrying the shared secret of the OAuth front
pub const AUTH_BRIDGE_HEADER: &str = "x-auth-bridge-secret";

/// Maximum length of a display name
pub const MAX_NAME_LENGTH: u64 = 100;

// =============================================================================
// LOGIN LOG
// =============================================================================

/// Days a login log entry is kept. Zero keeps entries forever.
pub const DEFAULT_LOGIN_LOG_RETENTION_DAYS: u32 = 3;

/// Entries returned by the login log listing when no limit is given
pub const DEFAULT_LOGIN_LOG_LIMIT: i64 = 100;

/// Largest limit accepted by the login log listing
pub const MAX_LOGIN_LOG_LIMIT: i64 = 1000;

/// Longest user agent stored with a login
pub const MAX_USER_AGENT_LENGTH: usize = 512;

/// Seconds between two login log cleanups
pub const LOGIN_LOG_CLEANUP_INTERVAL_SECS: u64 = 60 * 60;

// =============================================================================
// GRADING DEFAULTS
// =============================================================================

/// Number of scores that count towards a student's average
pub const DEFAULT_GRADING_TOP_N: usize = 20;

/// Decimal places shown for averages
pub const AVERAGE_DECIMALS: i32 = 2;

/// Maximum length of an exam name
pub const MAX_EXAM_NAME_LENGTH: u64 = 128;

// =============================================================================
// BULK OPERATIONS
// =============================================================================

/// Maximum rows accepted by a single import request
pub const MAX_IMPORT_ROWS: usize = 5000;

/// Maximum students accepted by a single aggregate request
pub const MAX_AGGREGATE_STUDENTS: usize = 5000;

// =============================================================================
// BACKUP
// =============================================================================

/// Backup document format identifier
pub const BACKUP_FORMAT: &str = "gradebook-backup-v1";

/// Backup document version
pub const BACKUP_VERSION: u32 = 1;

/// Largest backup document accepted by restore
pub const MAX_BACKUP_BYTES: usize = 64 * 1024 * 1024;

// =============================================================================
// EXPORT COLUMNS
// =============================================================================

/// Fixed leading columns of the grade export table
pub mod export_columns {
    pub const SEAT_NUMBER: &str = "Seat Number";
    pub const NAME: &str = "Name";
}

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const STUDENT: &str = "student";

    /// All user roles
    pub const ALL: &[&str] = &[ADMIN, STUDENT];
}
