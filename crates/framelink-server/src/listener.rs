//! TCP listener for the responder.
//!
//! The listener only establishes channels; all protocol work happens in
//! [`crate::Session`]. The responder serves one connection per invocation,
//! so there is no accept loop here — callers accept once and hand the
//! stream to a session.

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// TCP listener handing out connected duplex channels.
pub struct MessageListener {
    listener: TcpListener,
}

impl MessageListener {
    /// Binds to the configured address.
    pub async fn bind(config: &ServerConfig) -> ServerResult<Self> {
        let listener = TcpListener::bind(config.bind_addr).await?;
        info!(addr = %listener.local_addr()?, "listening");
        Ok(Self { listener })
    }

    /// Returns the bound address (useful with an ephemeral port).
    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts a single connection.
    pub async fn accept(&self) -> ServerResult<(TcpStream, SocketAddr)> {
        let (stream, addr) = self.listener.accept().await?;
        debug!(peer = %addr, "accepted connection");
        Ok((stream, addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn bind_and_accept() {
        let config = ServerConfig::new("127.0.0.1:0".parse().unwrap());
        let listener = MessageListener::bind(&config).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream.write_all(b"x").await.unwrap();
        });

        let (_stream, peer) = listener.accept().await.unwrap();
        assert_eq!(peer.ip(), addr.ip());

        client.await.unwrap();
    }
}
