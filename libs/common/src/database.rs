//! Database module for handling SQLite connections and operations
//!
//! This module provides connection pooling, configuration, schema setup,
//! and health checks for the SQLite database.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::env;
use std::str::FromStr;
use tracing::{error, info};

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: SQLite connection URL (default: "sqlite://portal.db")
    /// - `DATABASE_MAX_CONNECTIONS`: Maximum number of connections (default: 5)
    pub fn from_env() -> DatabaseResult<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://portal.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

/// Initialize a SQLite connection pool
///
/// # Arguments
///
/// * `config` - Database configuration
///
/// # Returns
///
/// * `DatabaseResult<SqlitePool>` - SQLite connection pool or error
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    info!("Initializing database connection pool");

    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| DatabaseError::Configuration(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(DatabaseError::Connection)?;

    Ok(pool)
}

/// Create the accounts table if it does not exist yet
///
/// The UNIQUE constraints on `username` and `email` are the authoritative
/// guard against duplicate accounts; application-level pre-checks only
/// exist to produce field-specific error messages.
pub async fn init_schema(pool: &SqlitePool) -> DatabaseResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BLOB PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::Migration(e.to_string()))?;

    info!("Users table ready");
    Ok(())
}

/// Check database connectivity
///
/// # Arguments
///
/// * `pool` - SQLite connection pool
///
/// # Returns
///
/// * `DatabaseResult<bool>` - True if database is reachable, false otherwise
pub async fn health_check(pool: &SqlitePool) -> DatabaseResult<bool> {
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => {
            info!("Database health check successful");
            Ok(true)
        }
        Err(e) => {
            error!("Database health check failed: {}", e);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_database_config_from_env() {
        unsafe {
            std::env::remove_var("DATABASE_URL");
            std::env::remove_var("DATABASE_MAX_CONNECTIONS");
        }

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.database_url, "sqlite://portal.db");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    #[serial]
    fn test_database_config_from_env_with_custom_values() {
        unsafe {
            std::env::set_var("DATABASE_URL", "sqlite://custom.db");
            std::env::set_var("DATABASE_MAX_CONNECTIONS", "20");
        }

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.database_url, "sqlite://custom.db");
        assert_eq!(config.max_connections, 20);

        unsafe {
            std::env::remove_var("DATABASE_URL");
            std::env::remove_var("DATABASE_MAX_CONNECTIONS");
        }
    }

    #[tokio::test]
    async fn test_init_pool_and_schema_in_memory() {
        let config = DatabaseConfig {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };

        let pool = init_pool(&config).await.unwrap();

        // Schema setup is idempotent
        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        assert!(health_check(&pool).await.unwrap());
    }
}
