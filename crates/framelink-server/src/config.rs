//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub bind_addr: SocketAddr,

    /// Path of the append-only event log.
    pub log_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_path: PathBuf::from("server.log"),
        }
    }
}

impl ServerConfig {
    /// Creates a new configuration with the given bind address.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Default::default()
        }
    }

    /// Builder: set the event log path.
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.log_path, PathBuf::from("server.log"));
    }

    #[test]
    fn custom_config() {
        let addr: SocketAddr = "0.0.0.0:9000".parse().unwrap();
        let config = ServerConfig::new(addr).with_log_path("/var/log/framelink.log");

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.log_path, PathBuf::from("/var/log/framelink.log"));
    }
}
