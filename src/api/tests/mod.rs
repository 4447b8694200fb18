use super::*;
use crate::config::{AggregateConfig, ClientConfig, Config, ServerConfig};
use crate::{Aggregator, HnClient};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};


/// Build app state pointed at a mock Hacker News API
fn test_state(server: &MockServer, num_stories: usize) -> AppState {
    let config = Config {
        client: ClientConfig {
            api_base: server.uri(),
            timeout: Duration::from_secs(5),
            ..Default::default()
        },
        aggregate: AggregateConfig::default(),
        server: ServerConfig {
            num_stories,
            ..Default::default()
        },
    };
    let client = Arc::new(HnClient::new(&config.client).unwrap());
    let aggregator = Arc::new(Aggregator::new(client.clone(), config.aggregate.clone()));
    AppState::new(client, aggregator, Arc::new(config))
}

async fn mock_top_stories(server: &MockServer, ids: &[u64]) {
    Mock::given(method("GET"))
        .and(path("/topstories.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ids))
        .mount(server)
        .await;
}

async fn mock_item(server: &MockServer, id: u64, kind: &str, url: Option<&str>) {
    let mut body = serde_json::json!({
        "by": "author",
        "id": id,
        "score": 10,
        "time": 1_700_000_000,
        "title": format!("Title {id}"),
        "type": kind,
    });
    if let Some(url) = url {
        body["url"] = serde_json::Value::String(url.to_string());
    }
    Mock::given(method("GET"))
        .and(path(format!("/item/{id}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_server_binds_and_stops_on_abort() {
    let server = MockServer::start().await;
    let state = test_state(&server, 1);

    let handle = tokio::spawn(start_server(state, "127.0.0.1:0".parse().unwrap()));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!handle.is_finished(), "server should still be running");
    handle.abort();
}
