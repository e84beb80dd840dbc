//! # cms-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Configuration comes from `CMS_PORT`,
//! `CMS_AUTH_TOKEN`, `CMS_METRICS_ENABLED`, and `RUST_LOG`.

use cms_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {e}");
        e
    })?;
    let port = config.port;

    if config.auth_token.is_none() {
        tracing::warn!("CMS_AUTH_TOKEN not set; API routes are unauthenticated");
    }

    let app = cms_api::app(AppState::with_config(config));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("CMS API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
