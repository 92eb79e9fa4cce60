//! Session model and related functionality

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session entity
///
/// All session state lives server-side; the client only ever holds the
/// opaque `token`. A session carries a fixed absolute expiry and never
/// reactivates once expired or destroyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session expiring `ttl` from now.
    pub fn new(token: String, user_id: Uuid, username: String, email: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token,
            user_id,
            username,
            email,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Check if the session has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_ttl(ttl: Duration) -> Session {
        Session::new(
            "token".to_string(),
            Uuid::new_v4(),
            "ben10".to_string(),
            "ben@omnitrix.io".to_string(),
            ttl,
        )
    }

    #[test]
    fn test_fresh_session_is_not_expired() {
        let session = session_with_ttl(Duration::seconds(3600));
        assert!(!session.is_expired());
    }

    #[test]
    fn test_zero_ttl_session_is_expired() {
        let session = session_with_ttl(Duration::seconds(0));
        assert!(session.is_expired());
    }
}
