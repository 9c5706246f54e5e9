//! Message frame
//!
//! Defines the on-wire frame layout.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;
use thiserror::Error;

/// Message frame
///
/// Length-prefixed layout:
///
/// ```text
/// +--------+--------+--------+----------+
/// | Length | Msg ID | Seq ID |   Body   |
/// | 4 bytes| 2 bytes| 4 bytes| variable |
/// +--------+--------+--------+----------+
/// ```
///
/// All integers are little-endian. `Length` excludes itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message ID
    pub message_id: u16,
    /// Sequence number
    pub sequence_id: u32,
    /// Message body
    pub body: Bytes,
}

impl Frame {
    /// Header size after the length prefix (message ID + sequence ID)
    pub const HEADER_SIZE: usize = 2 + 4;

    /// Length prefix size
    pub const LENGTH_SIZE: usize = 4;

    /// Maximum body size (16MB)
    pub const MAX_BODY_SIZE: usize = 16 * 1024 * 1024;

    /// Create a new frame
    pub fn new(message_id: u16, sequence_id: u32, body: Bytes) -> Self {
        Self {
            message_id,
            sequence_id,
            body,
        }
    }

    /// Create a frame with no body
    pub fn empty(message_id: u16, sequence_id: u32) -> Self {
        Self::new(message_id, sequence_id, Bytes::new())
    }

    /// Full encoded size including the length prefix
    pub fn frame_size(&self) -> usize {
        Self::LENGTH_SIZE + self.payload_size()
    }

    fn payload_size(&self) -> usize {
        Self::HEADER_SIZE + self.body.len()
    }

    /// Append the encoded frame to `dst`
    pub fn encode_into(&self, dst: &mut BytesMut) {
        dst.reserve(self.frame_size());
        dst.put_u32_le(self.payload_size() as u32);
        dst.put_u16_le(self.message_id);
        dst.put_u32_le(self.sequence_id);
        dst.put_slice(&self.body);
    }

    /// Encode the frame into a fresh buffer
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(self.frame_size());
        self.encode_into(&mut buf);
        buf
    }

    /// Decode one frame from the front of `buf`
    ///
    /// Returns `Ok(None)` and leaves `buf` untouched when it does not yet
    /// hold a complete frame.
    pub fn decode(buf: &mut BytesMut) -> Result<Option<Self>, FrameError> {
        if buf.len() < Self::LENGTH_SIZE {
            return Ok(None);
        }

        let mut len_bytes = [0u8; Self::LENGTH_SIZE];
        len_bytes.copy_from_slice(&buf[..Self::LENGTH_SIZE]);
        let frame_len = u32::from_le_bytes(len_bytes) as usize;

        if frame_len < Self::HEADER_SIZE {
            return Err(FrameError::InvalidFormat(format!(
                "length {frame_len} shorter than header"
            )));
        }
        if frame_len > Self::HEADER_SIZE + Self::MAX_BODY_SIZE {
            return Err(FrameError::FrameTooLarge(frame_len));
        }

        if buf.len() < Self::LENGTH_SIZE + frame_len {
            buf.reserve(Self::LENGTH_SIZE + frame_len - buf.len());
            return Ok(None);
        }

        buf.advance(Self::LENGTH_SIZE);
        let message_id = buf.get_u16_le();
        let sequence_id = buf.get_u32_le();
        let body = buf.split_to(frame_len - Self::HEADER_SIZE).freeze();

        Ok(Some(Self {
            message_id,
            sequence_id,
            body,
        }))
    }

    /// Check the frame can be encoded
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.body.len() > Self::MAX_BODY_SIZE {
            return Err(FrameError::BodyTooLarge(self.body.len()));
        }
        Ok(())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Frame[msg_id={}, seq={}, body_len={}]",
            self.message_id,
            self.sequence_id,
            self.body.len()
        )
    }
}

/// Frame errors
#[derive(Error, Debug)]
pub enum FrameError {
    /// Declared frame length exceeds the limit
    #[error("frame too large: {0} bytes")]
    FrameTooLarge(usize),

    /// Body exceeds the limit
    #[error("body too large: {0} bytes")]
    BodyTooLarge(usize),

    /// Malformed frame
    #[error("invalid frame format: {0}")]
    InvalidFormat(String),

    /// IO error from the underlying transport
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
