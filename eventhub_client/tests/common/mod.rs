//! Shared fixtures: an in-memory hub peer and a recording adapter.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use eventhub_client::{BoxError, ClientError, EventAdapter};
use eventhub_network::{BoxedStream, Connector, Frame, MessageCodec, TransportError};
use eventhub_protobuf::event_hub_message::Kind;
use eventhub_protobuf::{
    EVENT_HUB_MESSAGE_ID, Event, EventHubMessage, InterestedEvent, decode_message, encode_message,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::DuplexStream;
use tokio::sync::oneshot;
use tokio_util::codec::Framed;

/// Hands out one pre-made in-memory stream, then refuses.
pub struct MockConnector {
    stream: Mutex<Option<DuplexStream>>,
    calls: Arc<AtomicUsize>,
}

impl MockConnector {
    /// Returns the connector, the hub side of the stream and a dial counter.
    pub fn pair() -> (Self, HubPeer, Arc<AtomicUsize>) {
        let (client, hub) = tokio::io::duplex(64 * 1024);
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                stream: Mutex::new(Some(client)),
                calls: calls.clone(),
            },
            HubPeer {
                framed: Framed::new(hub, MessageCodec::new()),
                sequence_id: 0,
            },
            calls,
        )
    }

    /// Connector whose every dial fails.
    pub fn refusing() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                stream: Mutex::new(None),
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self, target: &str) -> Result<BoxedStream, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let stream = self.stream.lock().unwrap().take();
        match stream {
            Some(stream) => Ok(Box::new(stream)),
            None => Err(TransportError::Connection(format!("{target} refused"))),
        }
    }
}

/// The hub end of an in-memory stream.
pub struct HubPeer {
    framed: Framed<DuplexStream, MessageCodec>,
    sequence_id: u32,
}

impl HubPeer {
    /// Read the registration request and return the requested event types.
    pub async fn expect_register(&mut self) -> Vec<String> {
        let frame = self
            .framed
            .next()
            .await
            .expect("stream ended before registration")
            .expect("bad registration frame");
        assert_eq!(frame.message_id, EVENT_HUB_MESSAGE_ID);

        match decode_message(&frame.body).unwrap().kind {
            Some(Kind::Register(reg)) => reg.events.into_iter().map(|e| e.event_type).collect(),
            other => panic!("expected registration, got {other:?}"),
        }
    }

    pub async fn send_message(&mut self, message: EventHubMessage) {
        self.send_raw(encode_message(&message)).await;
    }

    pub async fn send_raw(&mut self, body: Bytes) {
        let frame = Frame::new(EVENT_HUB_MESSAGE_ID, self.sequence_id, body);
        self.sequence_id += 1;
        self.framed.send(frame).await.unwrap();
    }

    pub async fn ack(&mut self, event_types: &[&str]) {
        let interests = event_types.iter().map(|t| InterestedEvent::new(*t)).collect();
        self.send_message(EventHubMessage::register(interests)).await;
    }

    pub async fn event(&mut self, event_type: &str, payload: &'static str) {
        self.send_message(EventHubMessage::event(Event::new(event_type, payload)))
            .await;
    }

    /// Write raw bytes below the codec, e.g. a truncated frame.
    pub async fn send_bytes(&mut self, bytes: &[u8]) {
        use tokio::io::AsyncWriteExt;
        self.framed.get_mut().write_all(bytes).await.unwrap();
    }

    /// Wait until the client half-closes its outbound direction.
    pub async fn expect_client_close(&mut self) {
        let next = tokio::time::timeout(Duration::from_secs(5), self.framed.next())
            .await
            .expect("client never closed its side");
        assert!(next.is_none(), "expected end of stream, got {next:?}");
    }
}

/// What the adapter observed, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Recv(String),
    Done(Option<String>),
}

/// Adapter recording every call into a shared log.
pub struct RecordingAdapter {
    interests: Vec<InterestedEvent>,
    calls: Arc<Mutex<Vec<Call>>>,
    fail_on: Option<String>,
    done_tx: Option<oneshot::Sender<Option<ClientError>>>,
}

pub struct Recorder {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub done: oneshot::Receiver<Option<ClientError>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Wait for `done` and return the error it carried.
    pub async fn finished(&mut self) -> Option<ClientError> {
        tokio::time::timeout(Duration::from_secs(5), &mut self.done)
            .await
            .expect("done was never called")
            .expect("adapter dropped without done")
    }
}

impl RecordingAdapter {
    pub fn new(event_types: &[&str]) -> (Self, Recorder) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let (done_tx, done) = oneshot::channel();
        (
            Self {
                interests: event_types.iter().map(|t| InterestedEvent::new(*t)).collect(),
                calls: calls.clone(),
                fail_on: None,
                done_tx: Some(done_tx),
            },
            Recorder { calls, done },
        )
    }

    /// Make `recv` fail for the event whose payload equals `payload`.
    pub fn failing_on(mut self, payload: &str) -> Self {
        self.fail_on = Some(payload.to_string());
        self
    }
}

#[async_trait]
impl EventAdapter for RecordingAdapter {
    fn interested_events(&self) -> Vec<InterestedEvent> {
        self.interests.clone()
    }

    async fn recv(&mut self, event: Event) -> Result<(), BoxError> {
        let payload = String::from_utf8_lossy(&event.payload).into_owned();
        self.calls.lock().unwrap().push(Call::Recv(payload.clone()));
        if self.fail_on.as_deref() == Some(payload.as_str()) {
            return Err(format!("cannot handle {payload}").into());
        }
        Ok(())
    }

    async fn done(&mut self, err: Option<ClientError>) {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Done(err.as_ref().map(|e| e.to_string())));
        match self.done_tx.take() {
            Some(tx) => {
                let _ = tx.send(err);
            }
            None => panic!("done called twice"),
        }
    }
}
