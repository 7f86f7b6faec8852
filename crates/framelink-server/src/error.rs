//! Server error types.

use std::io;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the responder.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO error (socket, log file, etc.).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Protocol error (framing, channel I/O).
    #[error("protocol error: {0}")]
    Protocol(#[from] framelink_protocol::ProtocolError),

    /// TLS setup failure.
    #[cfg(feature = "tls")]
    #[error("TLS error: {message}")]
    Tls { message: String },
}

impl ServerError {
    /// Creates a TLS error.
    #[cfg(feature = "tls")]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls {
            message: message.into(),
        }
    }
}
