//! Session loop: one connected peer, processed to termination.
//!
//! The responder reads a fixed header, then the declared payload, selects
//! a canned response from the control flags, and writes it back, looping
//! until the peer sets FIN, disconnects, or an I/O failure aborts the
//! session. The channel is owned by the session for its whole lifetime and
//! dropped at the single exit point.
//!
//! Ordering within a session is strict and synchronous: the response is
//! never composed before the full payload has arrived, and the next header
//! is never awaited before the current response has been fully written.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, warn};

use framelink_protocol::{
    HEADER_SIZE, MessageHeader, payload_buffer, read_exact, select_response, write_all,
};

use crate::eventlog::EventSink;

/// Why the session loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Peer disconnected, or an I/O failure aborted the session.
    Disconnected,
    /// Peer sent FIN and the closing response was delivered.
    Finished,
}

/// One message-processing session over an exclusively owned duplex channel.
pub struct Session<S> {
    channel: S,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Takes ownership of a connected channel.
    pub fn new(channel: S) -> Self {
        Self { channel }
    }

    /// Runs the state machine until the session terminates.
    ///
    /// Every abort path records exactly one event before the channel is
    /// released. Errors are handled here, not propagated: any failure
    /// means "abort this session", never a crash.
    pub async fn run(mut self, sink: &dyn EventSink) -> SessionEnd {
        loop {
            let mut header_buf = [0u8; HEADER_SIZE];
            if let Err(e) = read_exact(&mut self.channel, &mut header_buf).await {
                // Normal peer-disconnect path, not a crash condition.
                if e.is_disconnect() {
                    debug!("peer disconnected while awaiting header");
                } else {
                    warn!(error = %e, "header receive failed");
                }
                record(sink, "Client disconnected or header receive failed.");
                return SessionEnd::Disconnected;
            }

            let header = match MessageHeader::decode(&header_buf) {
                Ok(header) => header,
                Err(e) => {
                    warn!(error = %e, "header decode failed");
                    record(sink, "Malformed header received.");
                    return SessionEnd::Disconnected;
                }
            };

            debug!(
                source_port = header.source_port,
                dest_port = header.dest_port,
                sequence = header.sequence,
                ack = header.ack,
                syn = header.syn,
                fin = header.fin,
                payload_len = header.payload_len,
                "header received"
            );
            record(
                sink,
                &format!(
                    "Received header: src={} dst={} seq={} ack={} syn={} fin={} len={}",
                    header.source_port,
                    header.dest_port,
                    header.sequence,
                    header.ack,
                    header.syn,
                    header.fin,
                    header.payload_len,
                ),
            );

            if header.payload_len > 0 {
                let mut payload = match payload_buffer(header.payload_len as usize) {
                    Ok(buf) => buf,
                    Err(e) => {
                        warn!(error = %e, "payload buffer allocation failed");
                        record(sink, "Payload allocation failed.");
                        return SessionEnd::Disconnected;
                    }
                };
                if let Err(e) = read_exact(&mut self.channel, &mut payload).await {
                    warn!(error = %e, "payload receive failed");
                    record(sink, "Payload receive failed or client disconnected.");
                    return SessionEnd::Disconnected;
                }
                record(
                    sink,
                    &format!("Client says: {}", String::from_utf8_lossy(&payload)),
                );
            }

            let response = select_response(&header);
            if let Err(e) = write_all(&mut self.channel, response.as_bytes()).await {
                warn!(error = %e, "response send failed");
                record(sink, "Response send failed.");
                return SessionEnd::Disconnected;
            }
            record(sink, &format!("Sent response: {response}"));

            // The FIN response is still delivered before the channel closes.
            if header.is_fin() {
                record(sink, "FIN received, closing the connection.");
                return SessionEnd::Finished;
            }
        }
    }
}

fn record(sink: &dyn EventSink, line: &str) {
    // The log sink is a side-effecting collaborator; a failed append must
    // not take the session down with it.
    if let Err(e) = sink.append(line) {
        warn!(error = %e, "event log append failed");
    }
}
