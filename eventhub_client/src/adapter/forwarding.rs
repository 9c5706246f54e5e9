use super::EventAdapter;
use crate::error::{BoxError, ClientError};
use async_trait::async_trait;
use eventhub_protobuf::{Event, InterestedEvent};
use tokio::sync::{mpsc, oneshot};

/// Adapter that forwards events into a bounded channel
///
/// A full channel applies backpressure to the receive loop. Dropping the
/// receiving side ends the subscription with a handler error.
pub struct ForwardingAdapter {
    interests: Vec<InterestedEvent>,
    events_tx: mpsc::Sender<Event>,
    outcome_tx: Option<oneshot::Sender<Option<ClientError>>>,
}

/// Receiving side of a [`ForwardingAdapter`]
pub struct Subscription {
    /// Delivered events, in arrival order. Ends once the subscription ends.
    pub events: mpsc::Receiver<Event>,
    /// Termination outcome, `None` for a clean end of stream
    pub outcome: oneshot::Receiver<Option<ClientError>>,
}

impl ForwardingAdapter {
    /// Create an adapter buffering up to `capacity` events
    ///
    /// A `capacity` of zero is treated as one.
    pub fn new(interests: Vec<InterestedEvent>, capacity: usize) -> (Self, Subscription) {
        let (events_tx, events) = mpsc::channel(capacity.max(1));
        let (outcome_tx, outcome) = oneshot::channel();
        (
            Self {
                interests,
                events_tx,
                outcome_tx: Some(outcome_tx),
            },
            Subscription { events, outcome },
        )
    }
}

#[async_trait]
impl EventAdapter for ForwardingAdapter {
    fn interested_events(&self) -> Vec<InterestedEvent> {
        self.interests.clone()
    }

    async fn recv(&mut self, event: Event) -> Result<(), BoxError> {
        self.events_tx
            .send(event)
            .await
            .map_err(|_| "event receiver dropped".into())
    }

    async fn done(&mut self, err: Option<ClientError>) {
        if let Some(tx) = self.outcome_tx.take() {
            let _ = tx.send(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_forwarding_adapter_delivers_in_order() {
        let (mut adapter, mut sub) =
            ForwardingAdapter::new(vec![InterestedEvent::new("block-events")], 4);

        adapter.recv(Event::new("block-events", "A")).await.unwrap();
        adapter.recv(Event::new("block-events", "B")).await.unwrap();
        adapter.done(None).await;
        drop(adapter);

        assert_eq!(sub.events.recv().await.unwrap().payload, "A");
        assert_eq!(sub.events.recv().await.unwrap().payload, "B");
        assert!(sub.events.recv().await.is_none());
        assert!(sub.outcome.await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_forwarding_adapter_zero_capacity_holds_one_event() {
        let (mut adapter, mut sub) =
            ForwardingAdapter::new(vec![InterestedEvent::new("block-events")], 0);

        adapter.recv(Event::new("block-events", "A")).await.unwrap();
        assert_eq!(sub.events.recv().await.unwrap().payload, "A");
    }

    #[tokio::test]
    async fn test_forwarding_adapter_closed_receiver_is_handler_error() {
        let (mut adapter, sub) = ForwardingAdapter::new(vec![], 1);
        drop(sub);

        assert!(adapter.recv(Event::new("block-events", "A")).await.is_err());
        // Outcome receiver is gone too; done must still not panic.
        adapter.done(Some(ClientError::NotConnected)).await;
    }
}
