//! TLS acceptor construction.
//!
//! The encrypted channel is a drop-in substitute for the plain TCP stream:
//! the accepted stream satisfies the same duplex read/write contract, so
//! the session loop and the codec are oblivious to it.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_rustls::TlsAcceptor;
use tokio_rustls::rustls::ServerConfig as RustlsServerConfig;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};

use crate::error::{ServerError, ServerResult};

/// Certificate and key locations for the TLS listener.
#[derive(Debug, Clone)]
pub struct TlsSettings {
    /// PEM certificate chain.
    pub cert_path: PathBuf,
    /// PEM private key (PKCS#8, PKCS#1, or SEC1).
    pub key_path: PathBuf,
}

impl TlsSettings {
    /// Creates TLS settings from certificate and key paths.
    pub fn new(cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            cert_path: cert_path.into(),
            key_path: key_path.into(),
        }
    }

    /// Builds an acceptor from the PEM files.
    pub fn build_acceptor(&self) -> ServerResult<TlsAcceptor> {
        let certs = load_certs(&self.cert_path)?;
        let key = load_key(&self.key_path)?;

        let config = RustlsServerConfig::builder()
            .with_no_client_auth()
            .with_single_cert(certs, key)
            .map_err(|e| ServerError::tls(format!("invalid certificate or key: {e}")))?;

        Ok(TlsAcceptor::from(Arc::new(config)))
    }
}

fn load_certs(path: &Path) -> ServerResult<Vec<CertificateDer<'static>>> {
    let file = File::open(path)
        .map_err(|e| ServerError::tls(format!("cannot open {}: {e}", path.display())))?;
    let mut reader = BufReader::new(file);

    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServerError::tls(format!("cannot parse certificates: {e}")))?;

    if certs.is_empty() {
        return Err(ServerError::tls(format!(
            "no certificates found in {}",
            path.display()
        )));
    }
    Ok(certs)
}

fn load_key(path: &Path) -> ServerResult<PrivateKeyDer<'static>> {
    let file = File::open(path)
        .map_err(|e| ServerError::tls(format!("cannot open {}: {e}", path.display())))?;
    let mut reader = BufReader::new(file);

    rustls_pemfile::private_key(&mut reader)
        .map_err(|e| ServerError::tls(format!("cannot parse private key: {e}")))?
        .ok_or_else(|| ServerError::tls(format!("no private key found in {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_certificate_file_is_an_error() {
        let dir = tempdir().unwrap();
        let settings = TlsSettings::new(dir.path().join("missing.pem"), dir.path().join("k.pem"));

        let result = settings.build_acceptor();
        assert!(matches!(result, Err(ServerError::Tls { .. })));
    }

    #[test]
    fn empty_certificate_file_is_an_error() {
        let dir = tempdir().unwrap();
        let cert = dir.path().join("cert.pem");
        let key = dir.path().join("key.pem");
        std::fs::write(&cert, "").unwrap();
        std::fs::write(&key, "").unwrap();

        let result = TlsSettings::new(&cert, &key).build_acceptor();
        assert!(matches!(result, Err(ServerError::Tls { .. })));
    }
}
