//! Client error types.

use std::fmt;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// IO error.
    Io(std::io::Error),
    /// Connection to the responder failed.
    Connection(String),
    /// Protocol/framing error.
    Protocol(String),
    /// Operation timed out.
    Timeout(String),
    /// Invalid interactive or command-line input.
    Input(String),
    /// Failure while running the responder.
    Server(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Connection(msg) => write!(f, "connection error: {}", msg),
            Self::Protocol(msg) => write!(f, "protocol error: {}", msg),
            Self::Timeout(msg) => write!(f, "timeout: {}", msg),
            Self::Input(msg) => write!(f, "invalid input: {}", msg),
            Self::Server(msg) => write!(f, "server error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<framelink_protocol::ProtocolError> for ClientError {
    fn from(err: framelink_protocol::ProtocolError) -> Self {
        Self::Protocol(err.to_string())
    }
}

impl From<framelink_server::ServerError> for ClientError {
    fn from(err: framelink_server::ServerError) -> Self {
        Self::Server(err.to_string())
    }
}
