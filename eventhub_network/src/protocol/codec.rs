//! Frame codec
//!
//! Plugs [`Frame`] into `tokio_util::codec::{FramedRead, FramedWrite}`.

use crate::protocol::frame::{Frame, FrameError};
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

/// Length-prefixed frame codec
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCodec;

impl MessageCodec {
    /// Create a new codec
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<Frame> for MessageCodec {
    type Error = FrameError;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        item.validate()?;
        item.encode_into(dst);
        Ok(())
    }
}

impl Decoder for MessageCodec {
    type Item = Frame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Frame::decode(src)
    }
}
