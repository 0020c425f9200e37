//! HTTP middleware

pub mod auth;
pub mod client_info;
pub mod logging;

pub use auth::{AuthenticatedUser, auth_middleware};
pub use client_info::ClientInfo;
pub use logging::logging_middleware;
