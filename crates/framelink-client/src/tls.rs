//! TLS channel variant for the client.
//!
//! Wraps the TCP stream in rustls; the framed exchange itself is
//! unchanged, since the encrypted stream satisfies the same duplex
//! read/write contract.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName};
use tokio_rustls::rustls::{ClientConfig as RustlsClientConfig, RootCertStore};

use crate::error::{ClientError, ClientResult};

/// TLS options for the client side.
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    /// Extra CA certificate bundle (PEM); webpki roots when absent.
    pub ca_file: Option<PathBuf>,

    /// Server name presented for certificate verification; defaults to
    /// the connection host.
    pub domain: Option<String>,
}

/// Builds a connector from the options.
pub fn build_connector(options: &TlsOptions) -> ClientResult<TlsConnector> {
    let mut roots = RootCertStore::empty();
    match options.ca_file {
        Some(ref ca) => {
            for cert in load_ca_certs(ca)? {
                roots
                    .add(cert)
                    .map_err(|e| ClientError::Config(format!("invalid CA certificate: {e}")))?;
            }
        }
        None => {
            roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        }
    }

    let config = RustlsClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(TlsConnector::from(Arc::new(config)))
}

/// Performs the TLS handshake over a connected TCP stream.
pub async fn connect(
    connector: &TlsConnector,
    stream: TcpStream,
    server_name: &str,
) -> ClientResult<TlsStream<TcpStream>> {
    let name = ServerName::try_from(server_name.to_string())
        .map_err(|_| ClientError::Config(format!("invalid TLS server name: {server_name}")))?;

    connector
        .connect(name, stream)
        .await
        .map_err(|e| ClientError::Connection(format!("TLS handshake failed: {e}")))
}

fn load_ca_certs(path: &Path) -> ClientResult<Vec<CertificateDer<'static>>> {
    let file = File::open(path)
        .map_err(|e| ClientError::Config(format!("cannot open {}: {e}", path.display())))?;
    let mut reader = BufReader::new(file);

    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ClientError::Config(format!("cannot parse CA certificates: {e}")))?;

    if certs.is_empty() {
        return Err(ClientError::Config(format!(
            "no certificates found in {}",
            path.display()
        )));
    }
    Ok(certs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_connector_uses_webpki_roots() {
        let connector = build_connector(&TlsOptions::default());
        assert!(connector.is_ok());
    }

    #[test]
    fn missing_ca_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let options = TlsOptions {
            ca_file: Some(dir.path().join("missing.pem")),
            domain: None,
        };
        assert!(matches!(
            build_connector(&options),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn empty_ca_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let ca = dir.path().join("ca.pem");
        std::fs::write(&ca, "").unwrap();

        let options = TlsOptions {
            ca_file: Some(ca),
            domain: None,
        };
        assert!(matches!(
            build_connector(&options),
            Err(ClientError::Config(_))
        ));
    }
}
