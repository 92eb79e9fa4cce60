//! Integration tests for the infrastructure components
//!
//! These tests verify that the SQLite database is properly configured,
//! that the schema can be created, and that the uniqueness constraints
//! on the users table hold.

use common::database::{DatabaseConfig, health_check, init_pool, init_schema};
use sqlx::Row;

/// Test that verifies the database is accessible and can perform
/// basic operations
#[tokio::test]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let pool = init_pool(&config).await?;

    // Verify connectivity
    assert!(health_check(&pool).await?, "Database health check failed");

    // Perform a simple query to test database connectivity
    let row = sqlx::query("SELECT 1 as result").fetch_one(&pool).await?;

    let result: i32 = row.get("result");
    assert_eq!(result, 1, "SQLite simple query test failed");

    // Create the schema
    init_schema(&pool).await?;

    // Insert an account row
    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&b"0000000000000001"[..])
    .bind("heroone")
    .bind("hero@example.com")
    .bind("not-a-real-hash")
    .bind("2026-01-01T00:00:00Z")
    .execute(&pool)
    .await?;

    Ok(())
}

/// The UNIQUE constraints on username and email are the authoritative
/// guard against duplicate accounts
#[tokio::test]
async fn test_unique_constraints_reject_duplicates() -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let pool = init_pool(&config).await?;
    init_schema(&pool).await?;

    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&b"0000000000000001"[..])
    .bind("heroone")
    .bind("hero@example.com")
    .bind("not-a-real-hash")
    .bind("2026-01-01T00:00:00Z")
    .execute(&pool)
    .await?;

    // Same username, different email
    let err = sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&b"0000000000000002"[..])
    .bind("heroone")
    .bind("other@example.com")
    .bind("not-a-real-hash")
    .bind("2026-01-01T00:00:00Z")
    .execute(&pool)
    .await
    .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
        other => panic!("Expected a unique violation, got: {other}"),
    }

    // Different username, same email
    let err = sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&b"0000000000000003"[..])
    .bind("herotwo")
    .bind("hero@example.com")
    .bind("not-a-real-hash")
    .bind("2026-01-01T00:00:00Z")
    .execute(&pool)
    .await
    .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
        other => panic!("Expected a unique violation, got: {other}"),
    }

    Ok(())
}
