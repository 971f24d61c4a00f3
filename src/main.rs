//! Book API Server
//!
//! REST server over an in-memory book catalog.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_api_server::{api, config::AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("book_api_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Book API Server v{}", env!("CARGO_PKG_VERSION"));

    let addr = config.server.socket_addr()?;

    // Create application state with the seeded store
    let state = AppState::new();
    tracing::info!("Loaded {} seed books", state.services.catalog.count_books().await);

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
