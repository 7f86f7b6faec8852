//! TCP message client.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::net::TcpStream;
use tracing::debug;

use framelink_protocol::{Message, write_all};

use crate::error::{ClientError, ClientResult};

/// Size of the best-effort response read.
const RESPONSE_BUFFER_SIZE: usize = 1024;

/// Client for framed exchanges with a responder.
pub struct MessageClient {
    host: String,
    port: u16,
    timeout: Duration,
}

impl MessageClient {
    /// Creates a new message client.
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    /// Returns the responder host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Connects, sends one framed message, and reads the textual response.
    pub async fn send(&self, message: &Message) -> ClientResult<String> {
        let stream = self.connect().await?;
        self.exchange(stream, message).await
    }

    /// Connects, wraps the stream in TLS, and performs the same exchange.
    #[cfg(feature = "tls")]
    pub async fn send_tls(
        &self,
        message: &Message,
        options: &crate::tls::TlsOptions,
    ) -> ClientResult<String> {
        let stream = self.connect().await?;
        let connector = crate::tls::build_connector(options)?;
        let server_name = options.domain.clone().unwrap_or_else(|| self.host.clone());

        let stream = tokio::time::timeout(
            self.timeout,
            crate::tls::connect(&connector, stream, &server_name),
        )
        .await
        .map_err(|_| ClientError::Timeout("TLS handshake".into()))??;

        self.exchange(stream, message).await
    }

    async fn connect(&self) -> ClientResult<TcpStream> {
        let addr = format!("{}:{}", self.host, self.port);
        debug!(addr = %addr, "connecting");

        tokio::time::timeout(self.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| {
                ClientError::Timeout(format!(
                    "connecting to {} after {}s",
                    addr,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| ClientError::Connection(format!("failed to connect to {addr}: {e}")))
    }

    /// Performs the framed exchange on any connected duplex channel.
    ///
    /// The response carries no framing of its own: it is read with a
    /// single best-effort read and treated as complete.
    pub async fn exchange<S>(&self, mut stream: S, message: &Message) -> ClientResult<String>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let wire = message.to_wire();
        tokio::time::timeout(self.timeout, write_all(&mut stream, &wire))
            .await
            .map_err(|_| ClientError::Timeout("sending message".into()))??;

        debug!(bytes = wire.len(), "message sent, waiting for response");

        let mut buf = [0u8; RESPONSE_BUFFER_SIZE];
        let n = tokio::time::timeout(self.timeout, stream.read(&mut buf))
            .await
            .map_err(|_| ClientError::Timeout("reading response".into()))?
            .map_err(ClientError::Io)?;

        if n == 0 {
            return Err(ClientError::Connection(
                "server closed the connection before responding".into(),
            ));
        }
        Ok(String::from_utf8_lossy(&buf[..n]).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    use framelink_protocol::MessageHeader;
    use framelink_server::{EventLog, MessageListener, ServerConfig, Session, SessionEnd};

    async fn spawn_responder() -> (std::net::SocketAddr, tokio::task::JoinHandle<SessionEnd>) {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("server.log");

        let config =
            ServerConfig::new("127.0.0.1:0".parse().unwrap()).with_log_path(&log_path);
        let listener = MessageListener::bind(&config).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let _dir = dir;
            let log = EventLog::new(&log_path);
            let (stream, _peer) = listener.accept().await.unwrap();
            Session::new(stream).run(&log).await
        });

        (addr, handle)
    }

    #[tokio::test]
    async fn exchange_over_tcp() {
        let (addr, responder) = spawn_responder().await;

        let client = MessageClient::new(addr.ip().to_string(), addr.port(), Duration::from_secs(5));
        let header = MessageHeader {
            source_port: 8000,
            dest_port: 8080,
            sequence: 1,
            syn: 1,
            ..Default::default()
        };
        let message = Message::with_payload(header, "hello");

        let response = client.send(&message).await.unwrap();
        assert_eq!(response, "SYN received - connection was initiated");

        // Dropping the client connection ends the session cleanly.
        assert_eq!(responder.await.unwrap(), SessionEnd::Disconnected);
    }

    #[tokio::test]
    async fn fin_exchange_closes_the_session() {
        let (addr, responder) = spawn_responder().await;

        let client = MessageClient::new(addr.ip().to_string(), addr.port(), Duration::from_secs(5));
        let header = MessageHeader {
            sequence: 2,
            fin: 1,
            ..Default::default()
        };
        let message = Message::with_payload(header, Vec::new());

        let response = client.send(&message).await.unwrap();
        assert_eq!(response, "FIN received - connection is closing");

        assert_eq!(responder.await.unwrap(), SessionEnd::Finished);
    }

    #[tokio::test]
    async fn connect_to_closed_port_is_a_connection_error() {
        // Bind then drop a listener to obtain a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = MessageClient::new(addr.ip().to_string(), addr.port(), Duration::from_secs(1));
        let message = Message::with_payload(MessageHeader::default(), Vec::new());

        let result = client.send(&message).await;
        assert!(matches!(result, Err(ClientError::Connection(_))));
    }
}
