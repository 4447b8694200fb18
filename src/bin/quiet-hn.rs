//! quiet-hn web server.
//!
//! Usage:
//!   quiet-hn [--port 3000] [--host 127.0.0.1] [--num-stories 30] [--api-base URL]
//!            [--batch-multiplier 1.17] [--timeout-secs 10]

use clap::Parser;
use quiet_hn::api::{AppState, start_server};
use quiet_hn::{Aggregator, Config, HnClient};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "quiet-hn",
    version,
    about = "Hacker News top stories, without the jobs and text posts"
)]
struct Cli {
    /// Port to start the web server on
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Number of top stories to display
    #[arg(long, default_value_t = 30)]
    num_stories: usize,

    /// Hacker News API base URL
    #[arg(long)]
    api_base: Option<String>,

    /// Ids fetched per window, as a multiple of the story count
    #[arg(long)]
    batch_multiplier: Option<f64>,

    /// Per-request timeout for API calls, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::default();
        config.server.bind_address = SocketAddr::new(self.host, self.port);
        config.server.num_stories = self.num_stories;
        if let Some(api_base) = self.api_base {
            config.client.api_base = api_base;
        }
        if let Some(multiplier) = self.batch_multiplier {
            config.aggregate.batch_multiplier = multiplier;
        }
        if let Some(secs) = self.timeout_secs {
            config.client.timeout = Duration::from_secs(secs);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("quiet_hn=info".parse()?))
        .init();

    let config = Cli::parse().into_config();
    config.validate()?;

    let client = Arc::new(HnClient::new(&config.client)?);
    let aggregator = Arc::new(Aggregator::new(client.clone(), config.aggregate.clone()));
    let bind_address = config.server.bind_address;
    let state = AppState::new(client, aggregator, Arc::new(config));

    start_server(state, bind_address).await?;
    Ok(())
}
