//! Admin session store.
//!
//! Sessions are an explicit token -> record map rather than hidden
//! framework state: login creates an entry, logout deletes it, and the
//! admin-gate middleware is a plain lookup. Only admin sessions exist,
//! so a live token implies `isAdmin`. Expired entries are pruned lazily
//! on lookup; there is no background sweeper.

use std::collections::HashMap;
use std::sync::Mutex;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use rand::RngCore;

/// Name of the cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "substore_session";

/// Token entropy in bytes before base64 encoding.
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, Copy)]
struct Session {
    expires_at: i64,
}

/// In-memory session store keyed by opaque token.
pub struct SessionStore {
    ttl_secs: i64,
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            ttl_secs,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn generate_token() -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Create a new admin session and return its token.
    pub fn create(&self) -> String {
        let token = Self::generate_token();
        let session = Session {
            expires_at: Utc::now().timestamp() + self.ttl_secs,
        };
        self.sessions
            .lock()
            .expect("session store poisoned")
            .insert(token.clone(), session);
        token
    }

    /// Check whether a token belongs to a live admin session.
    /// An expired entry is removed on the way out.
    pub fn is_admin(&self, token: &str) -> bool {
        let mut sessions = self.sessions.lock().expect("session store poisoned");
        match sessions.get(token) {
            Some(session) if session.expires_at > Utc::now().timestamp() => true,
            Some(_) => {
                sessions.remove(token);
                false
            }
            None => false,
        }
    }

    /// Destroy a session. Returns true if the token was present.
    pub fn destroy(&self, token: &str) -> bool {
        self.sessions
            .lock()
            .expect("session store poisoned")
            .remove(token)
            .is_some()
    }
}
