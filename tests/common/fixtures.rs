//! Mock Hacker News API fixtures

use quiet_hn::{Aggregator, Config, HnClient};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Kind of fixture item to serve
#[derive(Clone, Copy, Debug)]
pub enum Fixture {
    /// Story with a link
    Link,
    /// Story with text only (Ask HN style)
    Text,
    /// Job posting with a link
    Job,
    /// Comment
    Comment,
    /// `null` body, as for deleted items
    Deleted,
    /// HTTP 500
    ServerError,
}

/// A mock Hacker News API
pub struct MockHn {
    /// The underlying wiremock server
    pub server: MockServer,
}

impl MockHn {
    /// Start an empty mock API
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Serve `ids` from `/topstories.json`
    pub async fn top_stories(&self, ids: &[u64]) -> &Self {
        Mock::given(method("GET"))
            .and(path("/topstories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ids))
            .mount(&self.server)
            .await;
        self
    }

    /// Serve one item, optionally delayed
    pub async fn item(&self, id: u64, fixture: Fixture, delay: Duration) -> &Self {
        let template = match fixture {
            Fixture::ServerError => ResponseTemplate::new(500),
            Fixture::Deleted => ResponseTemplate::new(200).set_body_string("null"),
            other => ResponseTemplate::new(200).set_body_json(item_json(id, other)),
        };
        Mock::given(method("GET"))
            .and(path(format!("/item/{id}.json")))
            .respond_with(template.set_delay(delay))
            .mount(&self.server)
            .await;
        self
    }

    /// Config whose client points at this mock
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.client.api_base = self.server.uri();
        config.client.timeout = Duration::from_secs(5);
        config
    }

    /// Client and aggregator wired to this mock
    pub fn aggregator(&self, window_size: Option<usize>) -> (Arc<HnClient>, Aggregator) {
        let mut config = self.config();
        config.aggregate.window_size = window_size;
        let client = Arc::new(HnClient::new(&config.client).expect("client builds"));
        let aggregator = Aggregator::new(client.clone(), config.aggregate);
        (client, aggregator)
    }
}

/// JSON document for a fixture item
pub fn item_json(id: u64, fixture: Fixture) -> serde_json::Value {
    let mut body = serde_json::json!({
        "by": format!("user{id}"),
        "id": id,
        "time": 1_700_000_000 + id as i64,
        "score": 100 + id,
    });
    match fixture {
        Fixture::Link => {
            body["type"] = "story".into();
            body["title"] = format!("Story {id}").into();
            body["url"] = format!("https://www.site{id}.example/article").into();
            body["descendants"] = 3.into();
        }
        Fixture::Text => {
            body["type"] = "story".into();
            body["title"] = format!("Ask HN {id}").into();
            body["text"] = "What do you think?".into();
        }
        Fixture::Job => {
            body["type"] = "job".into();
            body["title"] = format!("Job {id}").into();
            body["url"] = format!("https://jobs{id}.example/").into();
        }
        Fixture::Comment => {
            body["type"] = "comment".into();
            body["text"] = "Great post".into();
            body["parent"] = 1.into();
        }
        Fixture::Deleted | Fixture::ServerError => {}
    }
    body
}
