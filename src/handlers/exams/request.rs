//! Exam request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_EXAM_NAME_LENGTH;

/// Create exam request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExamRequest {
    #[validate(length(min = 1, max = MAX_EXAM_NAME_LENGTH))]
    pub name: String,
}

/// Update exam request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateExamRequest {
    #[validate(length(min = 1, max = MAX_EXAM_NAME_LENGTH))]
    pub name: Option<String>,

    pub is_mandatory: Option<bool>,
}

/// The complete set of mandatory exams
#[derive(Debug, Deserialize)]
pub struct SetMandatoryRequest {
    pub exam_ids: Vec<Uuid>,
}
