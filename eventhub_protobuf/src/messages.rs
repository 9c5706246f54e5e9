//! Event hub wire messages
//!
//! Hand-maintained prost definitions equivalent to:
//!
//! ```text
//! message InterestedEvent { string event_type = 1; }
//! message RegisterEvent   { repeated InterestedEvent events = 1; }
//! message UnregisterEvent { repeated InterestedEvent events = 1; }
//! message Event           { string event_type = 1; bytes payload = 2; }
//! message EventHubMessage {
//!   oneof kind {
//!     RegisterEvent   register   = 1;
//!     Event           event      = 2;
//!     UnregisterEvent unregister = 3;
//!   }
//! }
//! ```

use bytes::Bytes;

/// One event category a consumer wants delivered
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct InterestedEvent {
    #[prost(string, tag = "1")]
    pub event_type: String,
}

impl InterestedEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
        }
    }
}

/// Registration request, echoed back by the hub as the acknowledgement
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegisterEvent {
    #[prost(message, repeated, tag = "1")]
    pub events: Vec<InterestedEvent>,
}

/// Withdraws interest in event categories
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UnregisterEvent {
    #[prost(message, repeated, tag = "1")]
    pub events: Vec<InterestedEvent>,
}

/// Event payload pushed by the hub
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Event {
    #[prost(string, tag = "1")]
    pub event_type: String,
    #[prost(bytes = "bytes", tag = "2")]
    pub payload: Bytes,
}

impl Event {
    pub fn new(event_type: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            event_type: event_type.into(),
            payload: payload.into(),
        }
    }
}

/// Envelope for every message exchanged on the stream
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EventHubMessage {
    #[prost(oneof = "event_hub_message::Kind", tags = "1, 2, 3")]
    pub kind: Option<event_hub_message::Kind>,
}

pub mod event_hub_message {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "1")]
        Register(super::RegisterEvent),
        #[prost(message, tag = "2")]
        Event(super::Event),
        #[prost(message, tag = "3")]
        Unregister(super::UnregisterEvent),
    }
}

impl EventHubMessage {
    pub fn register(events: Vec<InterestedEvent>) -> Self {
        Self {
            kind: Some(event_hub_message::Kind::Register(RegisterEvent { events })),
        }
    }

    pub fn unregister(events: Vec<InterestedEvent>) -> Self {
        Self {
            kind: Some(event_hub_message::Kind::Unregister(UnregisterEvent { events })),
        }
    }

    pub fn event(event: Event) -> Self {
        Self {
            kind: Some(event_hub_message::Kind::Event(event)),
        }
    }
}
