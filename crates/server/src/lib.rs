//! HTTP API for archive imports, posts, settings and AI-assisted formatting.
//!
//! All `/api` routes are JSON and, when an admin token is configured, require
//! it as a bearer token. `/health` and `/sitemap.xml` are public.

pub mod auth;
pub mod config;
pub mod error;
mod handlers;
pub mod pg;
mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::{REQUEST_TIMEOUT, create_router, create_router_with_timeout};
pub use state::AppState;

use std::time::Duration;

/// Builds the state from `config` and serves until the process is stopped.
pub async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(config).await?;
    let app = create_router_with_timeout(state, Duration::from_secs(config.request_timeout));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Starting server at http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
