//! # quiet-hn
//!
//! The Hacker News front page without jobs, polls and text posts.
//!
//! The ranked top-stories feed is just a list of ids; whether an id is a link
//! story is only known after fetching it. [`Aggregator`] fetches ids
//! concurrently, window by window, until it has the requested number of link
//! stories, and hands them back in their original rank order.
//!
//! ## Quick Start
//!
//! ```no_run
//! use quiet_hn::{Aggregator, Config, HnClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = Arc::new(HnClient::new(&config.client)?);
//!     let aggregator = Aggregator::new(client.clone(), config.aggregate.clone());
//!
//!     let ids = client.top_items().await?;
//!     match aggregator.fetch(&ids, 30).await {
//!         Ok(stories) => {
//!             for story in stories {
//!                 println!("{} ({})", story.item.title, story.host);
//!             }
//!         }
//!         Err(e) => eprintln!("{e}"),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Ordered concurrent story aggregation
pub mod aggregator;
/// Web server
pub mod api;
/// Hacker News API client
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Story filtering and enrichment
pub mod item;
/// HTML rendering
pub mod render;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use aggregator::Aggregator;
pub use client::{HnClient, ItemFetcher};
pub use config::{AggregateConfig, ClientConfig, Config, ServerConfig};
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use item::ParsedItem;
pub use types::{DiscardReason, Event, Item, ItemId, ItemKind};

/// Wait for a termination signal.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
#[cfg(unix)]
pub(crate) async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register signal handlers, using ctrl_c fallback");
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received Ctrl+C signal");
        }
    }
}

#[cfg(not(unix))]
pub(crate) async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
