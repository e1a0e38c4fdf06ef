use std::env;

use crate::crypto::hash_secret;

/// Dev-only fallback password. Never valid in production: startup fails
/// there unless ADMIN_PASSWORD_HASH is set.
const DEV_FALLBACK_PASSWORD: &str = "changeme-dev";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub dev_mode: bool,
    /// Salted SHA-256 hex digest the admin password is checked against
    pub admin_password_hash: String,
    /// Seconds an admin session stays valid after login
    pub session_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let dev_mode = env::var("SUBSTORE_ENV")
            .map(|v| v == "dev" || v == "development")
            .unwrap_or(false);

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let admin_password_hash = match env::var("ADMIN_PASSWORD_HASH") {
            Ok(hash) => hash,
            Err(_) if dev_mode => {
                tracing::warn!(
                    "ADMIN_PASSWORD_HASH not set, using default dev password '{}'. \
                     Set ADMIN_PASSWORD_HASH before deploying (substore hash-password)",
                    DEV_FALLBACK_PASSWORD
                );
                hash_secret(DEV_FALLBACK_PASSWORD)
            }
            Err(_) => {
                panic!(
                    "ADMIN_PASSWORD_HASH must be set outside dev mode. \
                     Generate one with: substore hash-password"
                );
            }
        };

        let session_ttl_secs: i64 = env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);

        Self {
            host,
            port,
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "substore.db".to_string()),
            dev_mode,
            admin_password_hash,
            session_ttl_secs,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
