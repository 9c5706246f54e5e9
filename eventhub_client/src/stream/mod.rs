//! Subscription client
//!
//! Handshake and lifecycle live in `client`; the background delivery loop in
//! `receiver`.

mod client;
mod receiver;

pub use client::{DEFAULT_REGISTRATION_TIMEOUT, EventHubClient};
