//! Login log model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One successful sign-in
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct LoginLog {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub email: String,
    pub name: String,
    pub role: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}
