//! Responder: listener, session loop, event log.
//!
//! This crate provides the framelink responder side:
//! - TCP listener handing connected channels to sessions
//! - The session loop state machine (header, payload, response)
//! - Append-only event log sink
//! - Unix signal handling for shutdown
//! - Optional TLS acceptor (feature `tls`)
//!
//! # Example
//!
//! ```rust,no_run
//! use framelink_server::{EventLog, MessageListener, ServerConfig, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let log = EventLog::new(&config.log_path);
//!     let listener = MessageListener::bind(&config).await?;
//!
//!     let (stream, _peer) = listener.accept().await?;
//!     Session::new(stream).run(&log).await;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod eventlog;
mod listener;
mod session;
mod signals;
#[cfg(feature = "tls")]
mod tls;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use eventlog::{EventLog, EventSink};
pub use listener::MessageListener;
pub use session::{Session, SessionEnd};
pub use signals::{ShutdownSignal, SignalHandler};
#[cfg(feature = "tls")]
pub use tls::TlsSettings;
