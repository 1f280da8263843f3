use std::sync::Arc;

use anyhow::{Context, Result};
use cityweather_core::{Config, WeatherLookup, api};

/// Serve the HTTP API on `0.0.0.0:{port}` until the process is stopped.
pub async fn run(config: &Config, port: u16) -> Result<()> {
    let lookup = WeatherLookup::from_config(config)?;
    let app = api::router(Arc::new(lookup));

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app).await.context("HTTP server failed")
}
