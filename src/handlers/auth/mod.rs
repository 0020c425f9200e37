//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Authentication routes
///
/// `/session` is guarded by the bridge secret, `/me` by a bearer token.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(handler::get_current_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        .route("/session", post(handler::open_session))
}
