//! Event hub client
//!
//! Drives one subscription: connect, register, then hand the stream to a
//! background receive task.

use crate::adapter::EventAdapter;
use crate::connection::{ClientState, Inbound, InboundFrame, Outbound, SharedOutbound, split};
use crate::error::{ClientError, Result};
use crate::stream::receiver;
use eventhub_config::ConsumerConfig;
use eventhub_network::{Connector, TcpConnector};
use eventhub_protobuf::{EventHubMessage, InterestedEvent};
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Default bound on waiting for the registration acknowledgement
pub const DEFAULT_REGISTRATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Single-subscription event hub client
///
/// One instance serves exactly one subscription. Once started (successfully
/// or not) it cannot be started again; create a new client instead.
pub struct EventHubClient {
    connector: Arc<dyn Connector>,
    registration_timeout: Duration,
    state: Arc<RwLock<ClientState>>,
    outbound: Option<SharedOutbound>,
    receiver_handle: Option<JoinHandle<()>>,
}

impl EventHubClient {
    /// Create a TCP client from config
    pub fn new(config: &ConsumerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_connector(
            TcpConnector::new(config.connect_timeout()),
            config.registration_timeout(),
        ))
    }

    /// Create a client with a custom transport
    pub fn with_connector<C>(connector: C, registration_timeout: Duration) -> Self
    where
        C: Connector + 'static,
    {
        Self {
            connector: Arc::new(connector),
            registration_timeout,
            state: Arc::new(RwLock::new(ClientState::Uninitialized)),
            outbound: None,
            receiver_handle: None,
        }
    }

    /// Connect to `target`, register the adapter's interests and start
    /// delivering events in the background
    ///
    /// Returns once the hub has confirmed the registration. Errors up to that
    /// point are returned here and the adapter is never called; later errors
    /// reach the adapter through [`EventAdapter::done`].
    pub async fn start<A>(&mut self, target: &str, adapter: A) -> Result<()>
    where
        A: EventAdapter + 'static,
    {
        if *self.state.read().await != ClientState::Uninitialized {
            return Err(ClientError::AlreadyStarted);
        }

        let interests = adapter.interested_events();
        if interests.is_empty() {
            return Err(ClientError::InvalidConfig(
                "no interested events".to_string(),
            ));
        }

        let (inbound, outbound) = match self.connect_and_register(target, interests).await {
            Ok(halves) => halves,
            Err(e) => {
                warn!(addr = target, error = %e, "event hub subscription failed to start");
                self.set_state(ClientState::Terminated).await;
                return Err(e);
            }
        };

        let outbound = Arc::new(Mutex::new(outbound));
        self.outbound = Some(outbound.clone());
        self.set_state(ClientState::Streaming).await;
        info!(addr = target, "event hub registration confirmed");

        self.receiver_handle = Some(tokio::spawn(receiver::run(
            inbound,
            outbound,
            Box::new(adapter),
            self.state.clone(),
        )));

        Ok(())
    }

    /// Half-close the outbound direction
    ///
    /// The receive task keeps running until the hub closes its side.
    pub async fn stop(&self) -> Result<()> {
        let outbound = self.outbound.as_ref().ok_or(ClientError::NotConnected)?;

        let mut outbound = outbound.lock().await;
        if outbound.is_closed() {
            debug!("outbound stream already closed");
        }
        outbound.close_send().await
    }

    /// Current lifecycle state
    pub async fn state(&self) -> ClientState {
        *self.state.read().await
    }

    /// Whether the background receive task is still running
    pub fn is_running(&self) -> bool {
        self.receiver_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    async fn set_state(&self, state: ClientState) {
        *self.state.write().await = state;
    }

    async fn connect_and_register(
        &self,
        target: &str,
        interests: Vec<InterestedEvent>,
    ) -> Result<(Inbound, Outbound)> {
        self.set_state(ClientState::Connecting).await;
        let stream = self
            .connector
            .connect(target)
            .await
            .map_err(|e| ClientError::ConnectionFailed(format!("could not connect to {target}: {e}")))?;

        let (inbound, mut outbound) = split(stream);

        self.set_state(ClientState::AwaitingRegistration).await;
        let inbound = register(&mut outbound, inbound, interests, self.registration_timeout).await?;

        Ok((inbound, outbound))
    }
}

/// Send the registration request and wait for the acknowledgement
///
/// The first frame is read by a helper task reporting through a oneshot. On
/// timeout the outbound direction is half-closed and the helper is left to
/// finish once the hub closes its side; its result is dropped along with the
/// inbound half.
async fn register(
    outbound: &mut Outbound,
    inbound: Inbound,
    interests: Vec<InterestedEvent>,
    timeout: Duration,
) -> Result<Inbound> {
    debug!(interests = interests.len(), "sending registration");
    outbound
        .send_message(&EventHubMessage::register(interests))
        .await?;

    let (first_tx, first_rx) = oneshot::channel();
    tokio::spawn(async move {
        let mut inbound = inbound;
        let first = inbound.next().await;
        let _ = first_tx.send((first, inbound));
    });

    let (first, inbound) = match tokio::time::timeout(timeout, first_rx).await {
        Ok(Ok(received)) => received,
        Ok(Err(_)) => {
            return Err(ClientError::ReceiveFailed(
                "registration reader stopped".to_string(),
            ));
        }
        Err(_) => {
            // Half-close so the hub ends the stream and the reader finishes.
            if let Err(e) = outbound.close_send().await {
                debug!(error = %e, "closing outbound stream after registration timeout");
            }
            return Err(ClientError::Timeout(
                "timeout waiting for registration".to_string(),
            ));
        }
    };

    let frame = match first {
        Some(Ok(frame)) => frame,
        Some(Err(e)) => return Err(ClientError::ReceiveFailed(e.to_string())),
        None => {
            return Err(ClientError::Protocol(
                "stream closed before registration confirmed".to_string(),
            ));
        }
    };

    match InboundFrame::classify(frame) {
        InboundFrame::RegistrationAck(_) => Ok(inbound),
        InboundFrame::Event(_) => Err(ClientError::Protocol(
            "unexpected event before registration confirmed".to_string(),
        )),
        InboundFrame::Malformed => Err(ClientError::Protocol(
            "invalid empty confirmation".to_string(),
        )),
        InboundFrame::Unrecognized => Err(ClientError::Protocol(
            "unrecognized confirmation".to_string(),
        )),
    }
}
