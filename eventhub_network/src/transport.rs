//! Transport abstraction
//!
//! A [`Connector`] turns a target address into an established byte stream.
//! TLS or other secured transports plug in by implementing the trait.

use async_trait::async_trait;
use std::io;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::debug;

/// Transport errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Connection error
    #[error("connection error: {0}")]
    Connection(String),

    /// Dial timed out
    #[error("connect to {0} timed out")]
    Timeout(String),
}

/// Transport result type
pub type Result<T> = std::result::Result<T, TransportError>;

/// Byte stream usable as an event-hub transport
pub trait AsyncStream: AsyncRead + AsyncWrite + Send + Unpin + 'static {}

impl<T> AsyncStream for T where T: AsyncRead + AsyncWrite + Send + Unpin + 'static {}

/// Type-erased transport stream
pub type BoxedStream = Box<dyn AsyncStream>;

/// Transport factory
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establish a bidirectional stream to `target`
    async fn connect(&self, target: &str) -> Result<BoxedStream>;
}

/// Plain TCP connector with a dial timeout
#[derive(Debug, Clone)]
pub struct TcpConnector {
    connect_timeout: Duration,
}

impl TcpConnector {
    /// Create a connector with the given dial timeout
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    /// Dial timeout
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

impl Default for TcpConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, target: &str) -> Result<BoxedStream> {
        let stream = tokio::time::timeout(self.connect_timeout, TcpStream::connect(target))
            .await
            .map_err(|_| TransportError::Timeout(target.to_string()))?
            .map_err(|e| TransportError::Connection(format!("{target}: {e}")))?;

        stream.set_nodelay(true)?;
        debug!(addr = target, peer = ?stream.peer_addr().ok(), "tcp transport established");

        Ok(Box::new(stream))
    }
}
