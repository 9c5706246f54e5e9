//! Client stream halves and inbound frame classification

use crate::error::{ClientError, Result};
use eventhub_network::{BoxedStream, Frame, MessageCodec};
use eventhub_protobuf::event_hub_message::Kind;
use eventhub_protobuf::{
    EVENT_HUB_MESSAGE_ID, Event, EventHubMessage, RegisterEvent, decode_message, encode_message,
};
use futures_util::SinkExt;
use std::sync::Arc;
use tokio::io::{ReadHalf, WriteHalf};
use tokio::sync::Mutex;
use tokio_util::codec::{FramedRead, FramedWrite};

/// Client lifecycle state
///
/// Transitions only move forward:
/// `Uninitialized -> Connecting -> AwaitingRegistration -> Streaming -> Terminated`.
/// Any failure after `Uninitialized` jumps straight to `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Uninitialized,
    Connecting,
    AwaitingRegistration,
    Streaming,
    Terminated,
}

/// Read side of the stream; owned by exactly one task at a time
pub(crate) type Inbound = FramedRead<ReadHalf<BoxedStream>, MessageCodec>;

/// Outbound half shared between `stop` and receive-loop cleanup
pub(crate) type SharedOutbound = Arc<Mutex<Outbound>>;

/// Split an established transport into framed halves
pub(crate) fn split(stream: BoxedStream) -> (Inbound, Outbound) {
    let (read_half, write_half) = tokio::io::split(stream);
    (
        FramedRead::new(read_half, MessageCodec::new()),
        Outbound {
            sink: FramedWrite::new(write_half, MessageCodec::new()),
            sequence_id: 0,
            closed: false,
        },
    )
}

/// Write side of the stream
pub(crate) struct Outbound {
    sink: FramedWrite<WriteHalf<BoxedStream>, MessageCodec>,
    sequence_id: u32,
    closed: bool,
}

impl Outbound {
    /// Send one message as the next frame
    pub(crate) async fn send_message(&mut self, message: &EventHubMessage) -> Result<()> {
        if self.closed {
            return Err(ClientError::SendFailed(
                "outbound stream already closed".to_string(),
            ));
        }

        let frame = Frame::new(
            EVENT_HUB_MESSAGE_ID,
            self.sequence_id,
            encode_message(message),
        );
        self.sequence_id = self.sequence_id.wrapping_add(1);

        self.sink
            .send(frame)
            .await
            .map_err(|e| ClientError::SendFailed(e.to_string()))
    }

    /// Half-close the outbound direction. Idempotent.
    pub(crate) async fn close_send(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        self.sink
            .close()
            .await
            .map_err(|e| ClientError::SendFailed(e.to_string()))
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Classified inbound frame
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    /// Hub confirmed the registration
    RegistrationAck(RegisterEvent),
    /// Event payload
    Event(Event),
    /// Absent message kind or undecodable body
    Malformed,
    /// Well-formed frame of a kind this client does not expect
    Unrecognized,
}

impl InboundFrame {
    pub fn classify(frame: Frame) -> Self {
        if frame.message_id != EVENT_HUB_MESSAGE_ID {
            return Self::Unrecognized;
        }

        match decode_message(&frame.body) {
            Ok(message) => match message.kind {
                Some(Kind::Register(register)) => Self::RegistrationAck(register),
                Some(Kind::Event(event)) => Self::Event(event),
                Some(Kind::Unregister(_)) => Self::Unrecognized,
                None => Self::Malformed,
            },
            Err(_) => Self::Malformed,
        }
    }
}
