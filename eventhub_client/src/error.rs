//! Client-specific error types

use eventhub_config::ConfigError;
use thiserror::Error;

/// Error type returned by subscriber event handlers
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Client-specific errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid configuration, e.g. an empty interest set
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config could not be loaded or failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Transport could not be established
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// No active stream
    #[error("Not connected")]
    NotConnected,

    /// Client was already started once
    #[error("Client already started")]
    AlreadyStarted,

    /// Send operation failed
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// Receive operation failed
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    /// Registration was not confirmed in time
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Peer sent a frame that is invalid at this point of the protocol
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Subscriber event handler failed
    #[error("Handler error: {0}")]
    Handler(#[source] BoxError),
}

/// Client result type
pub type Result<T> = std::result::Result<T, ClientError>;
