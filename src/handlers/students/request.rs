//! Student request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{constants::MAX_NAME_LENGTH, services::student_service::StudentRow};

/// Create student request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,

    #[validate(length(min = 1, max = 16))]
    pub seat_number: String,
}

/// Roster rows extracted from a spreadsheet
#[derive(Debug, Deserialize)]
pub struct ImportStudentsRequest {
    pub rows: Vec<StudentRow>,
}
