//! Gradebook - High-School Exam Grade Service
//!
//! This library provides the core functionality for the gradebook service,
//! which keeps exam scores for a class and reports each student's top-N
//! average.
//!
//! # Features
//!
//! - Top-N grade aggregation over mandatory and best optional exams
//! - Bulk grade loading in a constant number of queries
//! - Roster and score-sheet imports
//! - Checksummed JSON backup and restore
//! - Role-based access control
//! - Login audit log with retention
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Grading**: Pure aggregation and the bulk loader
//! - **Repositories**: Database access
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod grading;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

use axum::{Router, middleware as axum_middleware};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the full application router under `/api/v1`
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", handlers::routes(state.clone()))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
