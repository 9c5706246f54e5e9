//! EventHub protobuf support
//!
//! Message definitions and body encode/decode helpers.

pub mod messages;

use bytes::Bytes;
use prost::Message;
use thiserror::Error;

pub use crate::messages::{
    Event, EventHubMessage, InterestedEvent, RegisterEvent, UnregisterEvent, event_hub_message,
};

/// Frame message ID carrying an [`EventHubMessage`] body
pub const EVENT_HUB_MESSAGE_ID: u16 = 1;

/// Protobuf errors
#[derive(Error, Debug)]
pub enum ProtoError {
    /// Body could not be decoded
    #[error("failed to decode message: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Encode a message into a frame body
pub fn encode_message(message: &EventHubMessage) -> Bytes {
    Bytes::from(message.encode_to_vec())
}

/// Decode a frame body into a message
pub fn decode_message(body: &[u8]) -> Result<EventHubMessage, ProtoError> {
    Ok(EventHubMessage::decode(body)?)
}

pub mod prelude {
    pub use crate::messages::{Event, EventHubMessage, InterestedEvent};
    pub use crate::{EVENT_HUB_MESSAGE_ID, decode_message, encode_message};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_hub_message::Kind;

    #[test]
    fn test_register_message_keeps_interest_order() {
        let msg = EventHubMessage::register(vec![
            InterestedEvent::new("block-events"),
            InterestedEvent::new("chaincode-events"),
        ]);

        let decoded = decode_message(&encode_message(&msg)).unwrap();
        match decoded.kind {
            Some(Kind::Register(reg)) => {
                let types: Vec<_> = reg.events.iter().map(|e| e.event_type.as_str()).collect();
                assert_eq!(types, ["block-events", "chaincode-events"]);
            }
            other => panic!("expected register, got {other:?}"),
        }
    }

    #[test]
    fn test_event_payload_preserved() {
        let msg = EventHubMessage::event(Event::new("block-events", vec![1u8, 2, 3]));
        let decoded = decode_message(&encode_message(&msg)).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_empty_body_decodes_to_absent_kind() {
        let decoded = decode_message(&[]).unwrap();
        assert!(decoded.kind.is_none());
    }

    #[test]
    fn test_garbage_body_is_decode_error() {
        // Field 1, wire type 2 (length-delimited) claiming 100 bytes that are not there.
        let result = decode_message(&[0x0a, 0x64, 0x01]);
        assert!(matches!(result, Err(ProtoError::Decode(_))));
    }
}
