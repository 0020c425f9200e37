//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod backup_repo;
pub mod exam_repo;
pub mod login_log_repo;
pub mod score_repo;
pub mod user_repo;

pub use backup_repo::{BackupRepository, RestoreCounts};
pub use exam_repo::ExamRepository;
pub use login_log_repo::LoginLogRepository;
pub use score_repo::ScoreRepository;
pub use user_repo::UserRepository;
