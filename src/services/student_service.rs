//! Student service

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::{
    constants::roles,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::{User, sort_by_seat},
    utils::{
        normalize_email,
        validation::{parse_seat_cell, sanitize_string, validate_seat_number},
    },
};

/// One row of a student roster
#[derive(Debug, Clone, Deserialize)]
pub struct StudentRow {
    /// Seat number as it came out of the sheet, text or number
    pub seat_number: serde_json::Value,
    pub name: String,
    pub email: String,
}

/// Outcome counts of a roster import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StudentImportStats {
    pub created: u32,
    pub updated: u32,
    pub unchanged: u32,
    pub errors: u32,
}

/// A roster row after validation
#[derive(Debug, Clone, PartialEq)]
struct CleanRow {
    seat_number: String,
    name: String,
    email: String,
}

/// Student service for business logic
pub struct StudentService;

impl StudentService {
    /// List students in seat order
    pub async fn list_students(pool: &PgPool) -> AppResult<Vec<User>> {
        let mut students = UserRepository::list_students(pool).await?;
        sort_by_seat(&mut students);
        Ok(students)
    }

    /// Get a student by ID
    pub async fn get_student(pool: &PgPool, id: &Uuid) -> AppResult<User> {
        UserRepository::find_by_id(pool, id)
            .await?
            .filter(User::is_student)
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }

    /// Create a single student
    pub async fn create_student(
        pool: &PgPool,
        email: &str,
        name: &str,
        seat_number: &str,
    ) -> AppResult<User> {
        let row = clean_row(&serde_json::Value::String(seat_number.to_string()), name, email)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        UserRepository::create(
            pool,
            &row.email,
            &row.name,
            Some(&row.seat_number),
            roles::STUDENT,
        )
        .await
        .map_err(|e| match e {
            AppError::AlreadyExists(_) => {
                AppError::AlreadyExists("Email or seat number already in use".to_string())
            }
            other => other,
        })
    }

    /// Import a roster keyed by email
    ///
    /// New emails become students. Known emails get their name refreshed; their
    /// seat number is part of the identity and a differing one is an error.
    pub async fn import_students(pool: &PgPool, rows: &[StudentRow]) -> AppResult<StudentImportStats> {
        let mut stats = StudentImportStats::default();

        let mut by_email: HashMap<String, User> = HashMap::new();
        let mut taken_seats: HashMap<String, String> = HashMap::new();
        for user in UserRepository::list_students(pool).await? {
            if let Some(seat) = &user.seat_number {
                taken_seats.insert(seat.clone(), user.email.clone());
            }
            by_email.insert(user.email.clone(), user);
        }

        for (index, raw) in rows.iter().enumerate() {
            let row = match clean_row(&raw.seat_number, &raw.name, &raw.email) {
                Ok(row) => row,
                Err(reason) => {
                    tracing::warn!(row = index + 1, reason, "Skipping roster row");
                    stats.errors += 1;
                    continue;
                }
            };

            if let Some(existing) = by_email.get(&row.email) {
                if existing.seat_number.as_deref() != Some(row.seat_number.as_str()) {
                    tracing::warn!(
                        row = index + 1,
                        email = %row.email,
                        "Seat number differs from the registered one"
                    );
                    stats.errors += 1;
                    continue;
                }
                if existing.name == row.name {
                    stats.unchanged += 1;
                    continue;
                }

                let updated = UserRepository::update_name(pool, &existing.id, &row.name).await?;
                by_email.insert(row.email.clone(), updated);
                stats.updated += 1;
                continue;
            }

            if let Some(owner) = taken_seats.get(&row.seat_number) {
                tracing::warn!(
                    row = index + 1,
                    seat_number = %row.seat_number,
                    owner = %owner,
                    "Seat number already assigned"
                );
                stats.errors += 1;
                continue;
            }

            match UserRepository::create(
                pool,
                &row.email,
                &row.name,
                Some(&row.seat_number),
                roles::STUDENT,
            )
            .await
            {
                Ok(user) => {
                    taken_seats.insert(row.seat_number.clone(), user.email.clone());
                    by_email.insert(user.email.clone(), user);
                    stats.created += 1;
                }
                // an admin account may own the email
                Err(AppError::AlreadyExists(_)) => {
                    tracing::warn!(row = index + 1, email = %row.email, "Email already in use");
                    stats.errors += 1;
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            created = stats.created,
            updated = stats.updated,
            unchanged = stats.unchanged,
            errors = stats.errors,
            "Roster import finished"
        );

        Ok(stats)
    }
}

fn clean_row(seat: &serde_json::Value, name: &str, email: &str) -> Result<CleanRow, &'static str> {
    let seat_number = parse_seat_cell(seat).ok_or("Missing seat number")?;
    validate_seat_number(&seat_number)?;

    let name = sanitize_string(name);
    if name.is_empty() {
        return Err("Missing name");
    }

    let email = normalize_email(email);
    if !email.validate_email() {
        return Err("Invalid email");
    }

    Ok(CleanRow {
        seat_number,
        name,
        email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_row_normalises() {
        let row = clean_row(&json!(12.0), "  Lin Mei ", " Lin.Mei@School.edu ").unwrap();
        assert_eq!(
            row,
            CleanRow {
                seat_number: "12".to_string(),
                name: "Lin Mei".to_string(),
                email: "lin.mei@school.edu".to_string(),
            }
        );
    }

    #[test]
    fn test_clean_row_rejects_bad_input() {
        assert_eq!(
            clean_row(&json!(null), "A", "a@school.edu"),
            Err("Missing seat number")
        );
        assert_eq!(clean_row(&json!("3"), " ", "a@school.edu"), Err("Missing name"));
        assert_eq!(clean_row(&json!("3"), "A", "not-an-email"), Err("Invalid email"));
        assert!(clean_row(&json!("3 4"), "A", "a@school.edu").is_err());
    }
}
