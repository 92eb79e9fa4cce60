//! User repository for database operations

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::error::{UserStoreError, UserStoreResult};
use crate::models::{NewUser, User};
use crate::validation::normalize_email;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user
    ///
    /// The email is normalized before storage. The pre-insert duplicate
    /// check exists to report which field collided; the UNIQUE constraints
    /// on the table remain the authoritative guard, and a constraint
    /// violation at insert time maps to the same conflict errors.
    pub async fn create(&self, new_user: &NewUser) -> UserStoreResult<User> {
        info!("Creating new user: {}", new_user.username);

        let email = normalize_email(&new_user.email);

        if let Some(row) =
            sqlx::query("SELECT username FROM users WHERE username = ?1 OR email = ?2")
                .bind(&new_user.username)
                .bind(&email)
                .fetch_optional(&self.pool)
                .await?
        {
            let existing_username: String = row.get("username");
            if existing_username == new_user.username {
                return Err(UserStoreError::DuplicateUsername);
            }
            return Err(UserStoreError::DuplicateEmail);
        }

        // Hash the password off the async workers; argon2 is deliberately slow
        let password = new_user.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut rand::thread_rng());
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
        })
        .await
        .map_err(|e| UserStoreError::Hashing(e.to_string()))?
        .map_err(|e| UserStoreError::Hashing(e.to_string()))?;

        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.clone(),
            email,
            password_hash,
            created_at: Utc::now(),
        };

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            // Lost a race with a concurrent signup; the constraint names the column
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                if db_err.message().contains("users.username") {
                    Err(UserStoreError::DuplicateUsername)
                } else {
                    Err(UserStoreError::DuplicateEmail)
                }
            }
            Err(e) => Err(UserStoreError::Database(e)),
        }
    }

    /// Find a user by username or email
    ///
    /// A single equality query for both fields; callers never learn which
    /// one matched.
    pub async fn find_by_identifier(&self, identifier: &str) -> UserStoreResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = ?1 OR email = ?2
            "#,
        )
        .bind(identifier)
        .bind(normalize_email(identifier))
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let user = User {
                    id: row.get("id"),
                    username: row.get("username"),
                    email: row.get("email"),
                    password_hash: row.get("password_hash"),
                    created_at: row.get("created_at"),
                };
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Verify a user's password
    ///
    /// Uses the hash function's own verify routine rather than comparing
    /// recomputed hashes, so the stored per-record salt is honored.
    pub async fn verify_password(&self, user: &User, password: &str) -> UserStoreResult<bool> {
        let password = password.to_string();
        let password_hash = user.password_hash.clone();

        tokio::task::spawn_blocking(move || -> UserStoreResult<bool> {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| UserStoreError::Hashing(e.to_string()))?;

            let argon2 = Argon2::default();
            Ok(argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok())
        })
        .await
        .map_err(|e| UserStoreError::Hashing(e.to_string()))?
    }
}
