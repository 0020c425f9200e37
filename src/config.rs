//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_GRADING_TOP_N, DEFAULT_JWT_EXPIRY_HOURS,
    DEFAULT_LOGIN_LOG_RETENTION_DAYS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};
use crate::grading::GradingPolicy;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub auth: AuthConfig,
    pub grading: GradingConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

/// Settings shared with the OAuth front that signs users in
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret the OAuth front presents when opening a session
    pub bridge_secret: String,
    /// Email that is promoted to admin on its first sign-in
    pub initial_admin_email: Option<String>,
    /// Days login log entries are kept, zero disables cleanup
    pub login_log_retention_days: u32,
}

/// Grade calculation configuration
#[derive(Debug, Clone)]
pub struct GradingConfig {
    /// Number of scores that count towards the average
    pub top_n: usize,
    /// Divide by `top_n` even when fewer scores are available
    pub pad_to_limit: bool,
    /// Count a missing mandatory score as zero
    pub zero_fill_mandatory: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            grading: GradingConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: required_var("DATABASE_URL")?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: required_var("JWT_SECRET")?,
            expiry_hours: parse_var("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
        })
    }
}

impl AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bridge_secret: required_var("AUTH_BRIDGE_SECRET")?,
            initial_admin_email: env::var("INITIAL_ADMIN_EMAIL")
                .ok()
                .map(|email| email.trim().to_lowercase())
                .filter(|email| !email.is_empty()),
            login_log_retention_days: parse_var(
                "LOGIN_LOG_RETENTION_DAYS",
                DEFAULT_LOGIN_LOG_RETENTION_DAYS,
            )?,
        })
    }
}

impl GradingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let top_n: usize = parse_var("GRADING_TOP_N", DEFAULT_GRADING_TOP_N)?;
        if top_n == 0 {
            return Err(ConfigError::InvalidValue("GRADING_TOP_N".to_string()));
        }

        Ok(Self {
            top_n,
            pad_to_limit: parse_var("GRADING_PAD_TO_LIMIT", false)?,
            zero_fill_mandatory: parse_var("GRADING_ZERO_FILL_MANDATORY", false)?,
        })
    }

    /// Policy handed to the grade aggregator
    pub fn policy(&self) -> GradingPolicy {
        GradingPolicy {
            limit: self.top_n,
            pad_to_limit: self.pad_to_limit,
            zero_fill_mandatory: self.zero_fill_mandatory,
        }
    }
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_GRADING_TOP_N,
            pad_to_limit: false,
            zero_fill_mandatory: false,
        }
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name.to_string()))
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name.to_string()))
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);

        let grading = GradingConfig::default();
        assert_eq!(grading.top_n, 20);
        assert!(!grading.pad_to_limit);
        assert!(!grading.zero_fill_mandatory);
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<u16>("SERVER_PORT", " 9000 ").unwrap(), 9000);
        assert!(parse_value::<bool>("GRADING_PAD_TO_LIMIT", "true").unwrap());
        assert!(matches!(
            parse_value::<usize>("GRADING_TOP_N", "twenty"),
            Err(ConfigError::InvalidValue(name)) if name == "GRADING_TOP_N"
        ));
        assert!(parse_value::<u32>("LOGIN_LOG_RETENTION_DAYS", "-1").is_err());
    }

    #[test]
    fn test_grading_policy_from_config() {
        let grading = GradingConfig {
            top_n: 5,
            pad_to_limit: true,
            zero_fill_mandatory: false,
        };
        let policy = grading.policy();
        assert_eq!(policy.limit, 5);
        assert!(policy.pad_to_limit);
        assert!(!policy.zero_fill_mandatory);
    }
}
