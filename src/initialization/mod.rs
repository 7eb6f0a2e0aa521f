//! Process-wide setup: logging, the TLS crypto provider and the client.

mod logger;

use rustls::crypto::{ring::default_provider, CryptoProvider};

use crate::client::Client;
use crate::transport::{NetworkTransport, TlsConnector};

pub use logger::init_logger_with;

/// Installs `ring` as the process-wide crypto provider for `rustls`.
///
/// Must run before the first TLS configuration is built.
pub fn init_crypto_provider() {
    // Reinstalling is harmless; the error only says a provider already exists.
    let _ = CryptoProvider::install_default(default_provider());
}

/// Builds the network client used by the binary.
///
/// # Arguments
///
/// * `max_hops` - Redirects one request may follow
pub fn init_client(max_hops: u32) -> Client<NetworkTransport> {
    let transport = NetworkTransport::new(TlsConnector::with_webpki_roots());
    Client::with_transport(transport).with_max_hops(max_hops)
}
