use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = server::database::init_db(&config.database)
        .await
        .context("Failed to initialize database")?;
    info!("Database connected and schema synced");

    let object_store = common::storage::build_object_store(&config.storage)
        .await
        .context("Failed to initialize object store")?;
    info!(backend = %config.storage.backend, "Object store ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        object_store,
        config,
    };
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
