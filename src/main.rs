use galleria::{
    config::AppConfig, db, repositories::MongoUserRepository, routes, services::PasswordHasher,
    AppState,
};

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "galleria=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().inspect_err(|e| tracing::error!("{}", e))?;

    // Database connection
    tracing::info!("Connecting to MongoDB...");
    let database = db::connect(&config).await.inspect_err(|e| {
        tracing::error!(
            "MongoDB connection failed. Check that MongoDB is running or update MONGODB_URI: {}",
            e
        )
    })?;
    tracing::info!(database = %database.name(), "MongoDB connected");

    let user_repository = Arc::new(MongoUserRepository::new(&database));
    user_repository
        .ensure_indexes()
        .await
        .inspect_err(|e| tracing::error!("Failed to create user indexes: {}", e))?;

    let app_state = AppState::new(user_repository, PasswordHasher::new(), config.images_dir.clone());
    let app = routes::build_router(app_state, &config.frontend_dir);

    // Start server
    let addr = SocketAddr::from((config.host, config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server running on http://{}", addr);
    tracing::info!("Open: http://localhost:{}/home_page.html", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
