//! # EventHub Client
//!
//! Subscribes to a push-based event hub and delivers events to an
//! [`EventAdapter`].
//!
//! ## Lifecycle
//!
//! 1. [`EventHubClient::start`] connects, sends the adapter's interest set
//!    and waits (bounded) for the hub to confirm the registration.
//! 2. A background task then feeds every event to [`EventAdapter::recv`],
//!    strictly in arrival order.
//! 3. When the stream ends, [`EventAdapter::done`] is called exactly once.
//!
//! [`EventHubClient::stop`] half-closes the outbound direction; the hub is
//! expected to close its side, which ends the subscription normally.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eventhub_client::{ConsumerConfig, EventHubClient, LoggingAdapter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConsumerConfig::default();
//!     let mut client = EventHubClient::new(&config)?;
//!
//!     client
//!         .start(&config.peer_address, LoggingAdapter::new(["block-events"]))
//!         .await?;
//!
//!     tokio::signal::ctrl_c().await?;
//!     client.stop().await?;
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod connection;
pub mod error;
pub mod stream;

// Re-export main types
pub use crate::adapter::{EventAdapter, ForwardingAdapter, LoggingAdapter, Subscription};
pub use crate::connection::{ClientState, InboundFrame};
pub use crate::error::{BoxError, ClientError, Result};
pub use crate::stream::{DEFAULT_REGISTRATION_TIMEOUT, EventHubClient};

pub use eventhub_config::ConsumerConfig;
pub use eventhub_protobuf::{Event, InterestedEvent};

// Prelude module for common imports
pub mod prelude {
    pub use crate::adapter::{EventAdapter, ForwardingAdapter, LoggingAdapter};
    pub use crate::connection::ClientState;
    pub use crate::error::{BoxError, ClientError, Result};
    pub use crate::stream::EventHubClient;
    pub use eventhub_config::ConsumerConfig;
    pub use eventhub_protobuf::{Event, InterestedEvent};
}
