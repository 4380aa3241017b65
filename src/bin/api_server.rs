// src/bin/api_server.rs

use product_inventory_api::transport;
use product_inventory_api::{ProductService, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // --- Record Store Initialization ---
    // An unreadable or corrupt products document is fatal: we never serve from a store we could not load.
    tracing::info!(db_path = %config.db_path.display(), "loading products document");
    let product_service = ProductService::open(&config.db_path)?;
    tracing::info!(products = product_service.count(), "product service initialized");

    let app_state = transport::http::AppState::new(product_service);

    // --- API Server Initialization ---
    let app = transport::http::build_app(app_state, &config);
    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "the server is running");
    tracing::info!(
        "Swagger UI available at http://localhost:{}{}",
        config.port,
        transport::http::router::SWAGGER_UI_PATH
    );
    if !config.static_dir.is_dir() {
        tracing::warn!(static_dir = %config.static_dir.display(), "static directory not found; only the API will be served");
    }

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            // Every write is flushed before its request completes, so there is nothing left to persist.
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
