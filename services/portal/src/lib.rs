//! Session-based authentication gateway for the Omnitrix Portal
//!
//! The portal registers accounts, verifies credentials against the
//! SQLite-backed credential store, issues server-side sessions, and
//! gates access to the protected dashboard view.

pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod validation;
pub mod views;

use sqlx::SqlitePool;

use crate::{repositories::UserRepository, session::SessionManager};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub user_repository: UserRepository,
    pub sessions: SessionManager,
}
