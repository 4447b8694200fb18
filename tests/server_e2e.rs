//! End-to-end web server tests
//!
//! Runs the real router on an ephemeral port, backed by a mock Hacker News
//! API, and talks to it over HTTP.

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{Fixture, MockHn};
use quiet_hn::{Aggregator, HnClient};
use quiet_hn::api::{AppState, create_router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Serve the router for `hn` on 127.0.0.1, returning its address.
async fn spawn_server(hn: &MockHn, num_stories: usize) -> SocketAddr {
    let mut config = hn.config();
    config.server.num_stories = num_stories;
    config.aggregate.window_size = Some(4);

    let client = Arc::new(HnClient::new(&config.client).unwrap());
    let aggregator = Arc::new(Aggregator::new(client.clone(), config.aggregate.clone()));
    let state = AppState::new(client, aggregator, Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.ok();
    });
    addr
}

async fn feed() -> MockHn {
    let hn = MockHn::start().await;
    hn.top_stories(&[11, 12, 13, 14, 15]).await;
    hn.item(11, Fixture::Link, Duration::from_millis(100)).await;
    hn.item(12, Fixture::Job, Duration::ZERO).await;
    hn.item(13, Fixture::Link, Duration::ZERO).await;
    hn.item(14, Fixture::Text, Duration::ZERO).await;
    hn.item(15, Fixture::Link, Duration::ZERO).await;
    hn
}

#[tokio::test]
async fn test_front_page_over_http() {
    let hn = feed().await;
    let addr = spawn_server(&hn, 3).await;

    let resp = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(
        resp.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );

    let body = resp.text().await.unwrap();
    let first = body.find("Story 11").expect("story 11 rendered");
    let second = body.find("Story 13").expect("story 13 rendered");
    let third = body.find("Story 15").expect("story 15 rendered");
    assert!(first < second && second < third);
    assert!(!body.contains("Job 12"));
    assert!(!body.contains("Ask HN 14"));
}

#[tokio::test]
async fn test_json_api_reports_partial_results() {
    let hn = feed().await;
    let addr = spawn_server(&hn, 5).await;

    let resp = reqwest::get(format!("http://{addr}/api/stories"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["requested"], 5);
    assert_eq!(body["complete"], false);
    let ids: Vec<u64> = body["stories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![11, 13, 15]);
}

#[tokio::test]
async fn test_health_over_http() {
    let hn = MockHn::start().await;
    let addr = spawn_server(&hn, 1).await;

    let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_upstream_outage_is_a_bad_gateway() {
    // No /topstories.json mock: wiremock answers 404
    let hn = MockHn::start().await;
    let addr = spawn_server(&hn, 3).await;

    let resp = reqwest::get(format!("http://{addr}/api/stories"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);

    let page = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(page.status(), 500);
}
