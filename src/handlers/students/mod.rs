//! Student management handlers

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

/// Student routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_students).post(handler::create_student))
        .route("/import", post(handler::import_students))
        .route("/{id}", get(handler::get_student))
}
