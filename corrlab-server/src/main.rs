//! CorrLab server — HTTP surface for the basket correlation pipeline.
//!
//! Routes:
//! - `GET /correlation` — fetch 5 years of daily closes for the configured
//!   basket and return the pairwise return-correlation matrix
//! - `GET /health` — liveness probe

use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;
mod state;

use config::ServerConfig;
use state::AppState;

fn app(state: Arc<AppState>) -> Router {
    // The dashboard is served from arbitrary origins; the endpoint is
    // read-only, so CORS stays wide open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/correlation", get(routes::correlation::correlation_handler))
        .route("/health", get(routes::health))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = ServerConfig::from_env();
    let state = Arc::new(AppState::new(&cfg)?);
    tracing::info!(
        entries = state.basket.len(),
        window_years = state.window_years,
        "basket loaded"
    );

    let addr: SocketAddr = format!("{}:{}", cfg.bind, cfg.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("corrlab listening on http://{addr}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {e}");
        return;
    }
    tracing::info!("shutdown signal received, stopping");
}
