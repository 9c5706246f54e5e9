//! EventHub network layer
//!
//! Frame codec and the transport abstraction used to reach an event hub.

pub mod protocol;
pub mod transport;

pub use crate::protocol::{Frame, FrameError, MessageCodec};
pub use crate::transport::{
    AsyncStream, BoxedStream, Connector, TcpConnector, TransportError,
};

pub mod prelude {
    pub use crate::protocol::{Frame, MessageCodec};
    pub use crate::transport::{BoxedStream, Connector, TcpConnector};
}
