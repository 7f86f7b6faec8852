//! Client configuration file.
//!
//! An optional TOML file supplies connection defaults; CLI flags always
//! win over file values.
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 8080
//! timeout = 5
//!
//! [tls]
//! enabled = true
//! ca_file = "/etc/framelink/ca.pem"
//! domain = "framelink.example"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

/// Values read from `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    /// Responder host.
    pub host: Option<String>,

    /// Responder port.
    pub port: Option<u16>,

    /// Connection timeout in seconds.
    pub timeout: Option<u64>,

    /// TLS defaults.
    #[cfg(feature = "tls")]
    #[serde(default)]
    pub tls: TlsFileSettings,
}

/// TLS-related configuration values.
#[cfg(feature = "tls")]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsFileSettings {
    /// Connect over TLS unless overridden on the command line.
    #[serde(default)]
    pub enabled: bool,

    /// Extra CA certificate bundle (PEM).
    pub ca_file: Option<PathBuf>,

    /// Server name for certificate verification.
    pub domain: Option<String>,
}

impl ClientConfig {
    /// Loads the configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> ClientResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads the configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&contents)
            .map_err(|e| ClientError::Config(format!("invalid {}: {}", path.display(), e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("framelink").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_from_parses_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "host = \"10.0.0.1\"\nport = 9000\ntimeout = 2\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.host.as_deref(), Some("10.0.0.1"));
        assert_eq!(config.port, Some(9000));
        assert_eq!(config.timeout, Some(2));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = ClientConfig::load_from(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert!(config.host.is_none());
        assert!(config.port.is_none());
    }

    #[cfg(feature = "tls")]
    #[test]
    fn tls_section_is_optional() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = 8443\n\n[tls]\nenabled = true\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert!(config.tls.enabled);
        assert!(config.tls.ca_file.is_none());
        assert!(config.tls.domain.is_none());
    }
}
