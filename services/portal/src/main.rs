use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database;
use portal::{
    AppState,
    repositories::UserRepository,
    routes,
    session::{SessionConfig, SessionManager},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting portal service");

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;
    database::init_schema(&pool).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let user_repository = UserRepository::new(pool.clone());
    let sessions = SessionManager::new(SessionConfig::from_env());

    let app_state = AppState {
        db_pool: pool,
        user_repository,
        sessions,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Portal service listening on 0.0.0.0:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
