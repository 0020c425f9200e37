//! Exam management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

/// Exam routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_exams).post(handler::create_exam))
        .route("/mandatory", put(handler::set_mandatory_exams))
        .route(
            "/{id}",
            put(handler::update_exam).delete(handler::delete_exam),
        )
}
