mod from_row;
mod schema;
pub mod queries;

pub use schema::init_db;

use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::rate_limit::LoginRateLimiter;
use crate::session::SessionStore;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    /// Product catalog database pool
    pub db: DbPool,
    /// Admin session store (token -> expiry)
    pub sessions: Arc<SessionStore>,
    /// Per-IP throttle for login attempts
    pub login_limiter: Arc<LoginRateLimiter>,
    /// Credential digest the admin password is checked against
    pub admin_password_hash: String,
}

pub fn create_pool(database_path: &str) -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::file(database_path);
    Pool::builder().max_size(10).build(manager)
}
