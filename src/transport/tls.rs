//! TLS upgrade of a TCP connection.
//!
//! Uses `rustls` with the `webpki-roots` trust anchors. The handshake is driven
//! to completion in [`TlsConnector::upgrade`] so certificate and protocol errors
//! show up as connection failures rather than on the first write.

use std::io;
use std::net::TcpStream;
use std::sync::Arc;

use log::debug;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};

/// A TLS session over a TCP stream.
pub type TlsStream = StreamOwned<ClientConnection, TcpStream>;

/// Wraps TCP streams in client TLS sessions.
#[derive(Clone, Debug)]
pub struct TlsConnector {
    config: Arc<ClientConfig>,
}

impl TlsConnector {
    pub fn new(config: Arc<ClientConfig>) -> Self {
        TlsConnector { config }
    }

    /// Connector trusting the Mozilla root set shipped in `webpki-roots`.
    pub fn with_webpki_roots() -> Self {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();
        TlsConnector::new(Arc::new(config))
    }

    /// Performs the handshake for `host` over `tcp`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a host that is not a valid server name, or the
    /// I/O error that ended the handshake (certificate errors included).
    pub fn upgrade(&self, host: &str, mut tcp: TcpStream) -> io::Result<TlsStream> {
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let mut connection =
            ClientConnection::new(Arc::clone(&self.config), server_name).map_err(io::Error::other)?;

        while connection.is_handshaking() {
            connection.complete_io(&mut tcp)?;
        }
        debug!(
            "TLS handshake with {host} complete ({:?})",
            connection.protocol_version()
        );

        Ok(StreamOwned::new(connection, tcp))
    }
}
