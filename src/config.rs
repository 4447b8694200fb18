//! Configuration types for quiet-hn

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};

/// Hacker News API client configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash
    /// (default: "https://hacker-news.firebaseio.com/v0")
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout (default: 10 seconds)
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Story aggregation configuration
///
/// Controls how many ids are fetched per window. Used as a nested sub-config
/// within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Window size as a multiple of the requested story count (default: 1.17)
    ///
    /// Some share of the ranked ids are jobs or text posts, so each window
    /// asks for a few more ids than stories still needed. With the default,
    /// a request for 30 stories fetches 35 ids per window.
    #[serde(default = "default_batch_multiplier")]
    pub batch_multiplier: f64,

    /// Fixed window size, overriding `batch_multiplier` (None = derive from the multiplier)
    #[serde(default)]
    pub window_size: Option<usize>,

    /// Capacity of the event broadcast channel (default: 256)
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            batch_multiplier: default_batch_multiplier(),
            window_size: None,
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

impl AggregateConfig {
    /// Number of ids to fetch per window when `n` stories are requested
    pub fn window_for(&self, n: usize) -> usize {
        match self.window_size {
            Some(size) => size.max(1),
            None => ((n as f64 * self.batch_multiplier).round() as usize).max(1),
        }
    }
}

/// Web server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3000)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Number of stories shown on the page (default: 30)
    #[serde(default = "default_num_stories")]
    pub num_stories: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            num_stories: default_num_stories(),
        }
    }
}

/// Main configuration for quiet-hn
///
/// Every component receives its settings from here at construction time.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// API client settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Aggregation settings
    #[serde(default)]
    pub aggregate: AggregateConfig,

    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Check that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.client.api_base).map_err(|e| {
            Error::config("client.api_base", format!("invalid URL {:?}: {e}", self.client.api_base))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::config(
                "client.api_base",
                format!("unsupported scheme {:?}, expected http or https", base.scheme()),
            ));
        }
        if self.client.timeout.is_zero() {
            return Err(Error::config("client.timeout", "timeout must be non-zero"));
        }

        let multiplier = self.aggregate.batch_multiplier;
        if !multiplier.is_finite() || multiplier < 1.0 {
            return Err(Error::config(
                "aggregate.batch_multiplier",
                format!("batch multiplier must be a finite number >= 1.0, got {multiplier}"),
            ));
        }
        if self.aggregate.window_size == Some(0) {
            return Err(Error::config(
                "aggregate.window_size",
                "window size must be positive",
            ));
        }
        if self.aggregate.event_channel_capacity == 0 {
            return Err(Error::config(
                "aggregate.event_channel_capacity",
                "event channel capacity must be positive",
            ));
        }

        if self.server.num_stories == 0 {
            return Err(Error::config(
                "server.num_stories",
                "number of stories must be positive",
            ));
        }
        Ok(())
    }
}

fn default_api_base() -> String {
    "https://hacker-news.firebaseio.com/v0".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    concat!("quiet-hn/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_batch_multiplier() -> f64 {
    1.17
}

fn default_event_channel_capacity() -> usize {
    256
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn default_num_stories() -> usize {
    30
}
