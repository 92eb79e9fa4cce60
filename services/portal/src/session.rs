//! Session management backed by an in-process store
//!
//! The session authority exclusively owns all session state; clients only
//! ever hold the opaque reference issued here. Expired entries are purged
//! lazily on access rather than by a background sweep.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use rand::{Rng, distributions::Alphanumeric};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::models::Session;

/// Name of the cookie carrying the session reference.
pub const SESSION_COOKIE: &str = "portal_session";

/// Length of a generated session reference, in alphanumeric characters.
const SESSION_TOKEN_LEN: usize = 48;

/// Session manager configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Absolute session time-to-live in seconds
    pub ttl_seconds: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_seconds: 3600 }
    }
}

impl SessionConfig {
    /// Create a new SessionConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SESSION_TTL_SECONDS`: Session time-to-live in seconds (default: 3600)
    pub fn from_env() -> Self {
        let ttl_seconds = std::env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        Self { ttl_seconds }
    }
}

/// Session manager for handling user sessions
#[derive(Clone)]
pub struct SessionManager {
    /// Session manager configuration
    config: SessionConfig,
    /// Active sessions keyed by their opaque reference
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Issue a new session bound to the given account
    ///
    /// The returned reference is sampled from the thread-local CSPRNG and
    /// is the only thing the transport layer hands to the client. A login
    /// always mints a brand-new reference; destroyed or expired references
    /// never reactivate.
    pub async fn issue(&self, user_id: Uuid, username: &str, email: &str) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_TOKEN_LEN)
            .map(char::from)
            .collect();

        let session = Session::new(
            token.clone(),
            user_id,
            username.to_string(),
            email.to_string(),
            Duration::seconds(self.config.ttl_seconds),
        );

        let mut sessions = self.sessions.lock().await;
        sessions.insert(token.clone(), session);

        info!("Issued session for user: {}", user_id);
        token
    }

    /// Validate a session reference
    ///
    /// Returns `None` for missing or expired references; expired entries
    /// are removed on access.
    pub async fn validate(&self, token: &str) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;

        let expired = match sessions.get(token) {
            Some(session) if session.is_expired() => true,
            Some(session) => return Some(session.clone()),
            None => false,
        };

        if expired {
            sessions.remove(token);
        }

        None
    }

    /// Destroy a session unconditionally
    ///
    /// Destroying an already-absent session is not an error.
    pub async fn destroy(&self, token: &str) {
        let mut sessions = self.sessions.lock().await;
        if sessions.remove(token).is_some() {
            info!("Destroyed session");
        }
    }

    /// Get the session manager configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
impl SessionManager {
    async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
