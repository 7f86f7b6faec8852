//! Serve command — runs the responder in the foreground.
//!
//! Orchestrates the event log, signal handler, listener, and one session:
//! accept a single connection, process messages until the session
//! terminates, then exit. SIGTERM/SIGINT interrupt the accept wait.

use tracing::{info, warn};

use framelink_server::{
    EventLog, EventSink, MessageListener, ServerConfig, Session, SignalHandler,
};

use crate::cli::ServeArgs;
use crate::error::{ClientError, ClientResult};

/// Starts the responder and blocks until the session ends or a
/// termination signal arrives.
pub async fn run(args: &ServeArgs) -> ClientResult<()> {
    let config = ServerConfig::new(args.bind).with_log_path(&args.log_file);
    let log = EventLog::new(&config.log_path);

    #[cfg(feature = "tls")]
    let acceptor = match (args.tls_cert.as_ref(), args.tls_key.as_ref()) {
        (Some(cert), Some(key)) => {
            Some(framelink_server::TlsSettings::new(cert, key).build_acceptor()?)
        }
        _ => None,
    };

    let signals = SignalHandler::new();
    signals.spawn_listener();

    let listener = MessageListener::bind(&config).await?;
    let addr = listener.local_addr()?;
    println!("Server is listening on {addr}...");
    record(&log, &format!("Server started, listening on {addr}"));

    let served = async {
        let (stream, peer) = listener.accept().await?;
        record(&log, &format!("Client connected: {peer}"));

        #[cfg(feature = "tls")]
        let end = match acceptor {
            Some(ref acceptor) => match acceptor.accept(stream).await {
                Ok(stream) => Session::new(stream).run(&log).await,
                Err(e) => {
                    warn!(error = %e, "TLS handshake failed");
                    record(&log, "TLS handshake failed.");
                    framelink_server::SessionEnd::Disconnected
                }
            },
            None => Session::new(stream).run(&log).await,
        };
        #[cfg(not(feature = "tls"))]
        let end = Session::new(stream).run(&log).await;

        info!(end = ?end, "session ended");
        Ok::<(), ClientError>(())
    };

    let shutdown = signals.shutdown();
    tokio::select! {
        result = served => result?,
        _ = shutdown.wait() => {
            info!("shutdown signal received");
        }
    }

    record(&log, "Server has shut down.");
    Ok(())
}

fn record(log: &EventLog, line: &str) {
    if let Err(e) = log.append(line) {
        warn!(error = %e, "event log append failed");
    }
}
