//! # EventHub
//!
//! Consumer side of a push-based event hub: connect, register interest in
//! event categories, and receive events until the hub closes the stream.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eventhub::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> eventhub::Result<()> {
//!     let config = ConsumerConfig::default().load_with_env_override()?;
//!     let mut client = EventHubClient::new(&config)?;
//!
//!     let (adapter, mut sub) =
//!         ForwardingAdapter::new(vec![InterestedEvent::new("block-events")], 64);
//!     client.start(&config.peer_address, adapter).await?;
//!
//!     while let Some(event) = sub.events.recv().await {
//!         println!("{}: {} bytes", event.event_type, event.payload.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Crates
//!
//! - `eventhub_config`: `ConsumerConfig` (TOML + environment overrides)
//! - `eventhub_network`: frame codec and `Connector` transports
//! - `eventhub_protobuf`: wire message definitions
//! - `eventhub_client`: `EventHubClient` and the `EventAdapter` trait

pub use eventhub_client::{
    BoxError, ClientError, ClientState, DEFAULT_REGISTRATION_TIMEOUT, EventAdapter,
    EventHubClient, ForwardingAdapter, LoggingAdapter, Subscription,
};
pub use eventhub_config::{ConfigError, ConsumerConfig};
pub use eventhub_network::{Connector, TcpConnector};
pub use eventhub_protobuf::{Event, InterestedEvent};

// Crate re-exports for advanced users
pub use eventhub_client;
pub use eventhub_config;
pub use eventhub_network;
pub use eventhub_protobuf;

/// Commonly used types
///
/// `use eventhub::prelude::*;`
pub mod prelude {
    pub use eventhub_client::prelude::*;
    pub use eventhub_network::{Connector, TcpConnector};
}

/// Unified result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Client error
    #[error(transparent)]
    Client(#[from] eventhub_client::ClientError),

    /// Config error
    #[error(transparent)]
    Config(#[from] eventhub_config::ConfigError),

    /// Transport error
    #[error(transparent)]
    Transport(#[from] eventhub_network::TransportError),

    /// Protobuf error
    #[error(transparent)]
    Proto(#[from] eventhub_protobuf::ProtoError),

    /// IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
