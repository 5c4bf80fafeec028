//! Lending Desk server
//!
//! Loads configuration, seeds the catalog and serves the REST API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use mockable::DefaultClock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lending_desk::{api, config::AppConfig, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("lending_desk={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Lending Desk v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Overdue scope: {:?}", config.lending.overdue_scope);

    // Create services (in-memory library, seeded per configuration)
    let services = Services::new(&config, Arc::new(DefaultClock));

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    // Create application state
    let state = AppState {
        services: Arc::new(services),
    };

    // Build router
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
