//! Score management handlers

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

/// Score routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::score_matrix).put(handler::update_scores))
        .route("/import", post(handler::import_score_sheet))
}
