//! Grade handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Student self-service grade routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(handler::my_grades))
}

/// Admin grade routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::grade_table))
        .route("/aggregate", post(handler::aggregate_grades))
        .route("/{student_id}", get(handler::student_grades))
}
