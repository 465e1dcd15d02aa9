use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default minimum password length.
const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;
/// Default age after which synced records are purged.
const DEFAULT_SYNC_RETENTION_DAYS: i64 = 30;
/// Upper bound on `SYNC_RETENTION_DAYS` (100 years).
const MAX_SYNC_RETENTION_DAYS: i64 = 36_500;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Minimum accepted password length (default: `8`).
    pub password_min_length: usize,
    /// Lowercased emails that register with the `admin` role.
    pub admin_emails: Vec<String>,
    /// Whether the session cookie carries the `Secure` attribute.
    pub session_cookie_secure: bool,
    /// Directory of static PWA assets served at `/`, if any.
    pub static_dir: Option<PathBuf>,
    /// Synced records older than this many days are purged (default: `30`).
    pub sync_retention_days: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `DATABASE_URL`          | unset (in-memory storage)  |
    /// | `PASSWORD_MIN_LENGTH`   | `8`                        |
    /// | `ADMIN_EMAILS`          | empty                      |
    /// | `SESSION_COOKIE_SECURE` | `false`                    |
    /// | `STATIC_DIR`            | unset                      |
    /// | `SYNC_RETENTION_DAYS`   | `30`                       |
    ///
    /// JWT settings are documented on [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let password_min_length: usize = std::env::var("PASSWORD_MIN_LENGTH")
            .unwrap_or_else(|_| DEFAULT_PASSWORD_MIN_LENGTH.to_string())
            .parse()
            .expect("PASSWORD_MIN_LENGTH must be a valid usize");

        let admin_emails = split_list(&std::env::var("ADMIN_EMAILS").unwrap_or_default())
            .into_iter()
            .map(|e| noor_core::account::normalize_email(&e))
            .collect();

        let session_cookie_secure = std::env::var("SESSION_COOKIE_SECURE")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let sync_retention_days = std::env::var("SYNC_RETENTION_DAYS")
            .map(|v| parse_retention_days(&v))
            .unwrap_or(Ok(DEFAULT_SYNC_RETENTION_DAYS))
            .expect("SYNC_RETENTION_DAYS must be a whole number of days");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            jwt,
            password_min_length,
            admin_emails,
            session_cookie_secure,
            static_dir,
            sync_retention_days,
        }
    }

    /// Whether an (already normalized) email registers as admin.
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails.iter().any(|e| e == email)
    }
}

/// Parse `SYNC_RETENTION_DAYS`, accepting `1..=MAX_SYNC_RETENTION_DAYS`.
fn parse_retention_days(raw: &str) -> Result<i64, String> {
    let days: i64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("{raw:?} is not an integer: {e}"))?;
    if !(1..=MAX_SYNC_RETENTION_DAYS).contains(&days) {
        return Err(format!("{days} is outside 1..={MAX_SYNC_RETENTION_DAYS}"));
    }
    Ok(days)
}

/// Split a comma-separated list, dropping blanks.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
