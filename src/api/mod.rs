//! Web server module
//!
//! Serves the rendered front page plus a small JSON API over the same
//! story pipeline.

use crate::Result;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod error_response;
pub mod routes;
pub mod state;

pub use state::AppState;

/// Create the router with all route definitions
///
/// # Routes
///
/// - `GET /` - Rendered front page
/// - `GET /api/stories` - Same stories as JSON
/// - `GET /health` - Health check
/// - `GET /events` - Server-sent events stream of aggregation events
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/api/stories", get(routes::list_stories))
        .route("/health", get(routes::health_check))
        .route("/events", get(routes::event_stream))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the web server on `bind_address`.
///
/// Runs until SIGINT/SIGTERM (Ctrl+C on other platforms), then finishes
/// in-flight requests and returns.
///
/// # Example
///
/// ```no_run
/// use quiet_hn::{Aggregator, Config, HnClient};
/// use quiet_hn::api::{AppState, start_server};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let client = Arc::new(HnClient::new(&config.client)?);
/// let aggregator = Arc::new(Aggregator::new(client.clone(), config.aggregate.clone()));
/// let state = AppState::new(client, aggregator, Arc::new(config.clone()));
///
/// start_server(state, config.server.bind_address).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(state: AppState, bind_address: SocketAddr) -> Result<()> {
    let app = create_router(state);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(
        address = %listener.local_addr().unwrap_or(bind_address),
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(crate::wait_for_signal())
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("Server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
