//! Log every event from a hub until Ctrl-C.
//!
//! ```text
//! EVENTHUB_PEER_ADDRESS=127.0.0.1:7053 cargo run -p eventhub_client --example log_events -- block-events
//! ```
//!
//! An optional `EVENTHUB_CONFIG` points at a TOML config file.

use eventhub_client::{ConsumerConfig, EventHubClient, LoggingAdapter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("EVENTHUB_CONFIG") {
        Ok(path) => ConsumerConfig::from_file_with_env(path)?,
        Err(_) => ConsumerConfig::default().load_with_env_override()?,
    };
    tracing::info!("{}", config.summary());

    let mut event_types: Vec<String> = std::env::args().skip(1).collect();
    if event_types.is_empty() {
        event_types.push("block-events".to_string());
    }

    let mut client = EventHubClient::new(&config)?;
    client
        .start(&config.peer_address, LoggingAdapter::new(event_types))
        .await?;

    tokio::signal::ctrl_c().await?;
    client.stop().await?;
    Ok(())
}
