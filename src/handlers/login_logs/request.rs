//! Login log request DTOs

use serde::Deserialize;

/// Query parameters of the login log listing
#[derive(Debug, Default, Deserialize)]
pub struct ListLoginLogsQuery {
    pub limit: Option<i64>,
}
