//! Backup and restore handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{constants::MAX_BACKUP_BYTES, state::AppState};

/// Backup routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::export_backup))
        .route(
            "/restore",
            post(handler::restore_backup).layer(DefaultBodyLimit::max(MAX_BACKUP_BYTES)),
        )
}
