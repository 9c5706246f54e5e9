//! Background receive loop

use crate::adapter::EventAdapter;
use crate::connection::{ClientState, Inbound, InboundFrame, SharedOutbound};
use crate::error::ClientError;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Deliver events until the stream ends, close the stream, then notify the
/// adapter once
pub(crate) async fn run(
    mut inbound: Inbound,
    outbound: SharedOutbound,
    mut adapter: Box<dyn EventAdapter>,
    state: Arc<RwLock<ClientState>>,
) {
    let outcome = pump(&mut inbound, &mut *adapter).await;
    match &outcome {
        None => info!("event stream closed by hub"),
        Some(e) => warn!(error = %e, "event stream terminated"),
    }

    // Tear down before `done` so the adapter observes a terminated client.
    drop(inbound);
    if let Err(e) = outbound.lock().await.close_send().await {
        debug!(error = %e, "closing outbound stream after receive loop");
    }
    *state.write().await = ClientState::Terminated;

    adapter.done(outcome).await;
}

/// Returns `None` on clean end of stream, otherwise the terminating error
async fn pump(inbound: &mut Inbound, adapter: &mut dyn EventAdapter) -> Option<ClientError> {
    loop {
        let frame = match inbound.next().await {
            None => return None,
            Some(Err(e)) => return Some(ClientError::ReceiveFailed(e.to_string())),
            Some(Ok(frame)) => frame,
        };

        match InboundFrame::classify(frame) {
            InboundFrame::Event(event) => {
                debug!(event_type = %event.event_type, "delivering event");
                if let Err(e) = adapter.recv(event).await {
                    return Some(ClientError::Handler(e));
                }
            }
            InboundFrame::RegistrationAck(_) => {
                return Some(ClientError::Protocol(
                    "registration acknowledgement after registration confirmed".to_string(),
                ));
            }
            InboundFrame::Malformed => {
                return Some(ClientError::Protocol("invalid empty event".to_string()));
            }
            InboundFrame::Unrecognized => {
                return Some(ClientError::Protocol("unrecognized event frame".to_string()));
            }
        }
    }
}
