//! Application state for the web server

use crate::{Aggregator, Config, HnClient};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clones).
#[derive(Clone)]
pub struct AppState {
    /// Source of the ranked top-story ids
    pub client: Arc<HnClient>,

    /// Story aggregator
    pub aggregator: Arc<Aggregator>,

    /// Configuration (read-only)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(client: Arc<HnClient>, aggregator: Arc<Aggregator>, config: Arc<Config>) -> Self {
        Self {
            client,
            aggregator,
            config,
        }
    }
}
