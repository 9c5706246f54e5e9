use super::EventAdapter;
use crate::error::{BoxError, ClientError};
use async_trait::async_trait;
use eventhub_protobuf::{Event, InterestedEvent};
use tracing::{info, warn};

/// Adapter that logs every event through `tracing`
#[derive(Debug, Clone)]
pub struct LoggingAdapter {
    interests: Vec<InterestedEvent>,
    received: u64,
}

impl LoggingAdapter {
    pub fn new<I, S>(event_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            interests: event_types.into_iter().map(InterestedEvent::new).collect(),
            received: 0,
        }
    }

    /// Number of events seen so far
    pub fn received(&self) -> u64 {
        self.received
    }
}

#[async_trait]
impl EventAdapter for LoggingAdapter {
    fn interested_events(&self) -> Vec<InterestedEvent> {
        self.interests.clone()
    }

    async fn recv(&mut self, event: Event) -> Result<(), BoxError> {
        self.received += 1;
        info!(
            event_type = %event.event_type,
            payload_len = event.payload.len(),
            seq = self.received,
            "event received"
        );
        Ok(())
    }

    async fn done(&mut self, err: Option<ClientError>) {
        match err {
            None => info!(received = self.received, "event stream finished"),
            Some(e) => warn!(received = self.received, error = %e, "event stream failed"),
        }
    }
}
