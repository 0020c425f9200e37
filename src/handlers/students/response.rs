//! Student response DTOs

use serde::Serialize;

use crate::handlers::auth::UserResponse;

/// Students in seat order
#[derive(Debug, Serialize)]
pub struct StudentsListResponse {
    pub students: Vec<UserResponse>,
    pub total: usize,
}
