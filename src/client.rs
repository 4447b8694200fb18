//! Hacker News API client.
//!
//! [`ItemFetcher`] is the only thing the aggregator needs from the network:
//! fetch one item by id, or fail. [`HnClient`] implements it over the public
//! Firebase API and also loads the ranked top-stories feed.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{Item, ItemId};

/// Fetches a single item by id.
///
/// Implementations do no retrying of their own; a failed fetch is final.
/// Any timeout belongs to the implementation.
#[async_trait]
pub trait ItemFetcher: Send + Sync {
    /// Fetch the raw item record for `id`
    async fn get_item(&self, id: ItemId) -> Result<Item>;
}

/// Client for the Hacker News Firebase API
#[derive(Clone, Debug)]
pub struct HnClient {
    http_client: reqwest::Client,
    api_base: String,
}

impl HnClient {
    /// Create a client from explicit configuration
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are made against
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Ids of the current top stories (about 500), best first.
    ///
    /// The feed is not filtered: jobs and text posts are mixed in, and the
    /// kind of each entry is unknown until the item itself is fetched.
    pub async fn top_items(&self) -> Result<Vec<ItemId>> {
        let url = format!("{}/topstories.json", self.api_base);
        let ids: Option<Vec<ItemId>> = self.get_json(&url).await?;
        let ids = ids.unwrap_or_default();
        debug!(count = ids.len(), "Loaded top story ids");
        Ok(ids)
    }

    /// Fetch one item. A `null` document becomes [`Error::ItemNotFound`].
    pub async fn item(&self, id: ItemId) -> Result<Item> {
        let url = format!("{}/item/{}.json", self.api_base, id);
        let item: Option<Item> = self.get_json(&url).await?;
        item.ok_or(Error::ItemNotFound(id))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ItemFetcher for HnClient {
    async fn get_item(&self, id: ItemId) -> Result<Item> {
        self.item(id).await
    }
}
