//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_NAME_LENGTH;

/// Identity verified by the OAuth front
#[derive(Debug, Deserialize, Validate)]
pub struct SessionRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(max = MAX_NAME_LENGTH))]
    #[serde(default)]
    pub name: String,
}
