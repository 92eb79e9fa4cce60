//! Common library for the Omnitrix Portal application
//!
//! This crate provides shared functionality used by the portal service,
//! including database connectivity, schema setup, and error handling.

pub mod database;
pub mod error;

/// Example usage of the database module
///
/// ```rust,no_run
/// use common::database::{DatabaseConfig, init_pool, init_schema, health_check};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::from_env()?;
///     let pool = init_pool(&config).await?;
///     init_schema(&pool).await?;
///     let is_healthy = health_check(&pool).await?;
///     println!("Database health check: {}", is_healthy);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
