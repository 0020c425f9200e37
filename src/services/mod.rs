//! Business logic services

pub mod auth_service;
pub mod backup_service;
pub mod exam_service;
pub mod grade_service;
pub mod login_log_service;
pub mod score_service;
pub mod student_service;

pub use auth_service::AuthService;
pub use backup_service::BackupService;
pub use exam_service::ExamService;
pub use grade_service::GradeService;
pub use login_log_service::LoginLogService;
pub use score_service::ScoreService;
pub use student_service::StudentService;
