//! Login log repository

use sqlx::{PgExecutor, PgPool};

use crate::{
    error::AppResult,
    models::{LoginLog, User},
};

/// Repository for login log database operations
pub struct LoginLogRepository;

impl LoginLogRepository {
    /// Record a sign-in of `user`
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        user: &User,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> AppResult<LoginLog> {
        let log = sqlx::query_as::<_, LoginLog>(
            r#"
            INSERT INTO login_logs (user_id, email, name, role, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.role)
        .bind(ip_address)
        .bind(user_agent)
        .fetch_one(executor)
        .await?;

        Ok(log)
    }

    /// Most recent entries first
    pub async fn list_recent(pool: &PgPool, limit: i64) -> AppResult<Vec<LoginLog>> {
        let logs = sqlx::query_as::<_, LoginLog>(
            r#"SELECT * FROM login_logs ORDER BY created_at DESC LIMIT $1"#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(logs)
    }

    /// Delete entries older than `days` days, returning how many went
    pub async fn delete_older_than(pool: &PgPool, days: u32) -> AppResult<u64> {
        let result = sqlx::query(
            r#"DELETE FROM login_logs WHERE created_at < NOW() - INTERVAL '1 day' * $1"#,
        )
        .bind(days as i32)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
