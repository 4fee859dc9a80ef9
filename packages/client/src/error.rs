//! Error types for the drawing client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection was lost
    #[error("Connection lost")]
    ConnectionLost,

    /// The server URL cannot be used for a WebSocket connection
    #[error("Invalid server URL '{0}'")]
    InvalidUrl(String),

    /// A typed command could not be parsed or applied
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}
