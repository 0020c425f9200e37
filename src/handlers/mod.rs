//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod auth;
pub mod backup;
pub mod exams;
pub mod grades;
pub mod health;
pub mod login_logs;
pub mod scores;
pub mod students;

use axum::{Router, middleware};

use crate::{
    error::{AppError, AppResult},
    middleware::auth::{AuthenticatedUser, auth_middleware},
    state::AppState,
};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes(state.clone()))
        .nest(
            "/grades",
            grades::routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        .nest(
            "/admin",
            admin_routes().route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .nest("/students", students::routes())
        .nest("/exams", exams::routes())
        .nest("/scores", scores::routes())
        .nest("/grades", grades::admin_routes())
        .nest("/backup", backup::routes())
        .nest("/login-logs", login_logs::routes())
}

/// Verify user is admin
pub(crate) fn require_admin(auth_user: &AuthenticatedUser) -> AppResult<()> {
    if !auth_user.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }
    Ok(())
}
