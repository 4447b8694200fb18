//! End-to-end tests against the real Hacker News API
//!
//! These tests need network access and depend on whatever is on the front
//! page right now, so they are marked #[ignore].
//!
//! # Running the tests
//!
//! ```bash
//! cargo test --test e2e_live -- --ignored --nocapture
//! ```
//!
//! Set `HN_API_BASE` to point at a different API mirror.

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#![allow(clippy::unwrap_used, clippy::expect_used)]

use quiet_hn::{Aggregator, Config, HnClient, ItemKind};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn live_config() -> Config {
    let mut config = Config::default();
    if let Ok(base) = std::env::var("HN_API_BASE") {
        config.client.api_base = base;
    }
    config
}

#[tokio::test]
#[ignore]
async fn test_live_top_items() {
    let config = live_config();
    let client = HnClient::new(&config.client).unwrap();

    let ids = client.top_items().await.unwrap();
    println!("Top stories feed has {} ids", ids.len());

    assert!(!ids.is_empty());
    let item = client.item(ids[0]).await.unwrap();
    assert_eq!(item.id, ids[0]);
}

#[tokio::test]
#[ignore]
async fn test_live_front_page() {
    let config = live_config();
    let client = Arc::new(HnClient::new(&config.client).unwrap());
    let aggregator = Aggregator::new(client.clone(), config.aggregate.clone());

    let ids = client.top_items().await.unwrap();
    let start = Instant::now();
    let stories = aggregator.fetch(&ids, 30).await.unwrap();
    let elapsed = start.elapsed();
    println!("Fetched {} stories in {elapsed:?}", stories.len());

    assert_eq!(stories.len(), 30);
    assert!(elapsed < Duration::from_secs(30));

    let mut seen = HashSet::new();
    let mut last_rank = 0;
    for story in &stories {
        assert_eq!(story.item.kind, ItemKind::Story);
        assert!(!story.item.url.is_empty());
        assert!(seen.insert(story.id()), "duplicate story {}", story.id());

        let rank = ids.iter().position(|id| *id == story.id()).unwrap();
        assert!(rank >= last_rank, "story {} out of rank order", story.id());
        last_rank = rank;
    }
}
