//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User entity
///
/// `password_hash` holds the PHC-format argon2 output; the plaintext
/// password is never persisted or logged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// New user creation payload
///
/// Carries the plaintext password on its way to the credential store,
/// which hashes it before anything touches the database.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}
