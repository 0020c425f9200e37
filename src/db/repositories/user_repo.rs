//! User repository

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{constants::roles, error::AppResult, models::User};

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        email: &str,
        name: &str,
        seat_number: Option<&str>,
        role: &str,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, seat_number, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(seat_number)
        .bind(role)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email<'e, E: PgExecutor<'e>>(
        executor: E,
        email: &str,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE email = $1"#)
            .bind(email)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    /// Find students by any of the given seat numbers
    pub async fn find_students_by_seats(pool: &PgPool, seats: &[String]) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"SELECT * FROM users WHERE role = $1 AND seat_number = ANY($2)"#,
        )
        .bind(roles::STUDENT)
        .bind(seats)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// List all students. Callers order them by seat.
    pub async fn list_students(pool: &PgPool) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE role = $1"#)
            .bind(roles::STUDENT)
            .fetch_all(pool)
            .await?;

        Ok(users)
    }

    /// List every user, admins included
    pub async fn list_all(pool: &PgPool) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(r#"SELECT * FROM users ORDER BY created_at"#)
            .fetch_all(pool)
            .await?;

        Ok(users)
    }

    /// Update the display name
    pub async fn update_name<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        name: &str,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }
}
