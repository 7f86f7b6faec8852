//! Protocol error types.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Too few bytes to decode a header.
    #[error("truncated header: expected {expected} bytes, got {received}")]
    TruncatedHeader { expected: usize, received: usize },

    /// Peer closed its write side before the expected byte count arrived.
    #[error("connection closed: expected {expected} bytes, got {received}")]
    ConnectionClosed { expected: usize, received: usize },

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload buffer could not be obtained.
    #[error("allocation of {bytes} bytes failed")]
    Allocation { bytes: usize },
}

impl ProtocolError {
    /// Returns true if the error is the normal peer-disconnect condition.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::ConnectionClosed { .. })
    }
}
