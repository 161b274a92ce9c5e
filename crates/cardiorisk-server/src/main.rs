mod app;
mod dto;
mod error;
mod extract;
mod handlers;
mod services;
mod state;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::{Context, Result};
use cardiorisk_config::ServerConfig;
use tracing::info;

use crate::state::init_server_state;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    info!(
        model_path = %config.model_path.display(),
        model_required = config.model_required,
        origins = ?config.allowed_origins(),
        "Configuration loaded"
    );

    let state = Arc::new(init_server_state(&config)?);
    let app = app::router(state, &config);

    let addr = config.bind_addr();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
