//! Subscriber capability
//!
//! An [`EventAdapter`] declares which event categories it wants, receives
//! each delivered event, and learns how the subscription ended.

mod forwarding;
mod logging;

pub use forwarding::{ForwardingAdapter, Subscription};
pub use logging::LoggingAdapter;

use crate::error::{BoxError, ClientError};
use async_trait::async_trait;
use eventhub_protobuf::{Event, InterestedEvent};

/// Event hub subscriber
///
/// The client owns the adapter for the lifetime of the subscription and calls
/// it from a single task, so `recv` and `done` never run concurrently.
#[async_trait]
pub trait EventAdapter: Send {
    /// Event categories to register for. Called once, when the client starts.
    fn interested_events(&self) -> Vec<InterestedEvent>;

    /// Handle one event. Returning an error ends the subscription.
    async fn recv(&mut self, event: Event) -> Result<(), BoxError>;

    /// Called exactly once after a successful start, when the subscription
    /// ends. `None` means the hub closed the stream cleanly.
    ///
    /// By the time this runs the stream is closed and the client reports
    /// [`ClientState::Terminated`](crate::ClientState::Terminated).
    async fn done(&mut self, err: Option<ClientError>);
}
