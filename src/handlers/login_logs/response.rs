//! Login log response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::LoginLog;

#[derive(Debug, Serialize)]
pub struct LoginLogResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub email: String,
    pub name: String,
    pub role: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub logged_in_at: DateTime<Utc>,
}

impl From<LoginLog> for LoginLogResponse {
    fn from(log: LoginLog) -> Self {
        Self {
            id: log.id,
            user_id: log.user_id,
            email: log.email,
            name: log.name,
            role: log.role,
            ip_address: log.ip_address,
            user_agent: log.user_agent,
            logged_in_at: log.created_at,
        }
    }
}

/// Recent sign-ins, newest first
#[derive(Debug, Serialize)]
pub struct LoginLogsListResponse {
    pub logs: Vec<LoginLogResponse>,
    /// Days entries are kept, zero when they are kept forever
    pub retention_days: u32,
}
