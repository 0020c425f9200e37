//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::roles;

/// User database model (students and admins)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Seat number, the key used by score sheets. Admins usually have none.
    pub seat_number: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }

    /// Check if user is a student
    pub fn is_student(&self) -> bool {
        self.role == roles::STUDENT
    }

    /// Sort key placing numeric seats first in numeric order, then the rest by text
    pub fn seat_sort_key(&self) -> (u64, String) {
        let seat = self.seat_number.as_deref().unwrap_or_default();
        let numeric = seat.parse::<u64>().unwrap_or(u64::MAX);
        (numeric, seat.to_string())
    }
}

/// Sort students the way every list and export presents them
pub fn sort_by_seat(users: &mut [User]) {
    users.sort_by_cached_key(User::seat_sort_key);
}
