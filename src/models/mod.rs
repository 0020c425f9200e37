//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod backup;
pub mod exam;
pub mod login_log;
pub mod score;
pub mod user;

pub use backup::*;
pub use exam::*;
pub use login_log::*;
pub use score::*;
pub use user::*;
