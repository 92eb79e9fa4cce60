//! Repositories for database operations

pub mod user;

// Re-export for convenience
pub use user::UserRepository;
