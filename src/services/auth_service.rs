//! Authentication service
//!
//! Identities are verified by the external OAuth front. This service maps a
//! verified email onto a known user and issues the bearer token used by the API.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::Config,
    constants::roles,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    utils::normalize_email,
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Open a session for an identity the OAuth front has verified
    ///
    /// Unknown emails are refused, except the configured initial admin which is
    /// created on first sign-in.
    pub async fn sign_in(
        pool: &PgPool,
        config: &Config,
        email: &str,
        name: &str,
    ) -> AppResult<(User, String, i64)> {
        let email = normalize_email(email);

        let user = match UserRepository::find_by_email(pool, &email).await? {
            Some(user) => user,
            None if config.auth.initial_admin_email.as_deref() == Some(email.as_str()) => {
                tracing::info!(email = %email, "Seeding initial admin account");
                UserRepository::create(pool, &email, name.trim(), None, roles::ADMIN).await?
            }
            None => {
                tracing::warn!(email = %email, "Sign-in refused for unknown email");
                return Err(AppError::Forbidden(
                    "Email is not registered".to_string(),
                ));
            }
        };

        let (token, expires_in) = Self::issue_token(&user, config)?;
        tracing::info!(user_id = %user.id, role = %user.role, "User signed in");

        Ok((user, token, expires_in))
    }

    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, user_id: &Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(pool, user_id).await
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Generate an access token for a user
    pub fn issue_token(user: &User, config: &Config) -> AppResult<(String, i64)> {
        Self::encode_claims(
            &user.id,
            &user.email,
            &user.role,
            &config.jwt.secret,
            config.jwt.expiry_hours,
        )
    }

    /// Sign a token from raw claim values
    pub fn encode_claims(
        user_id: &Uuid,
        email: &str,
        role: &str,
        secret: &str,
        expiry_hours: i64,
    ) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(expiry_hours);
        let expires_in = expiry_hours * 3600;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_for_testing_only";

    #[test]
    fn test_token_round_trip() {
        let id = Uuid::new_v4();
        let (token, expires_in) =
            AuthService::encode_claims(&id, "a@school.test", roles::STUDENT, SECRET, 2).unwrap();
        assert_eq!(expires_in, 7200);

        let claims = AuthService::verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.role, roles::STUDENT);
        assert_eq!(claims.email, "a@school.test");
    }

    #[test]
    fn test_wrong_secret_is_invalid_token() {
        let (token, _) =
            AuthService::encode_claims(&Uuid::new_v4(), "a@school.test", roles::ADMIN, SECRET, 1)
                .unwrap();
        let err = AuthService::verify_token(&token, "another_secret").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_expired_token() {
        let (token, _) =
            AuthService::encode_claims(&Uuid::new_v4(), "a@school.test", roles::ADMIN, SECRET, -2)
                .unwrap();
        let err = AuthService::verify_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, AppError::TokenExpired));
    }
}
