use anyhow::Context;
use homzy_listings::config::Config;
use homzy_listings::http::{cors_layer, create_router, AppState};
use homzy_listings::service::ListingService;
use homzy_listings::store;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏠 Homzy listings API");
    info!("=====================");

    let config = Config::from_env().context("invalid configuration")?;

    // Open the document store
    let store = store::connect(&config.database).await?;
    info!("API data source: {}", store.source_name());

    let state = AppState::new(ListingService::new(store.clone()));
    let app = create_router(state, cors_layer(&config.cors_origins));

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("could not bind {}:{}", config.host, config.port))?;
    info!("🚀 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("👋 Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
