//! Protocol module
//!
//! Frame layout and codec.

pub mod codec;
pub mod frame;

pub use codec::MessageCodec;
pub use frame::{Frame, FrameError};
