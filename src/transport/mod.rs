//! Byte transports.
//!
//! The client only needs a duplex byte channel per attempt: connect, send the
//! request bytes, read until the peer closes, close. [`Transport`] is that seam;
//! [`NetworkTransport`] implements it over TCP, wrapped in TLS for `https`.

mod network;
mod tcp;
mod tls;

use std::fmt;
use std::io::{self, ErrorKind, Read, Write};
use std::time::Duration;

use crate::config::READ_CHUNK_SIZE;
use crate::error_handling::HttpClientError;
use crate::request::Request;

pub use network::{NetworkStream, NetworkTransport};
pub use tcp::connect_tcp;
pub use tls::{TlsConnector, TlsStream};

/// Where one attempt connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Host name or IP address, without IPv6 brackets
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Whether the connection is wrapped in TLS
    pub secure: bool,
}

impl Target {
    /// Connection target of `request`.
    pub fn of(request: &Request) -> Self {
        Target {
            host: request
                .host()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .to_string(),
            port: request.port(),
            secure: request.is_secure(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = if self.secure { "tls" } else { "tcp" };
        write!(f, "{scheme}://{}:{}", self.host, self.port)
    }
}

/// Opens one fresh connection per attempt.
pub trait Transport {
    /// Duplex byte channel produced by `connect`.
    type Connection: Read + Write;

    /// Connects to `target`; `timeout` bounds the connect and every later blocking call.
    ///
    /// # Errors
    ///
    /// Resolution, connect and TLS handshake failures are `HttpClientError::ConnectionFailed`.
    fn connect(
        &self,
        target: &Target,
        timeout: Duration,
    ) -> Result<Self::Connection, HttpClientError>;

    /// Closes a connection after its attempt. Dropping is enough by default.
    fn close(&self, connection: Self::Connection) {
        drop(connection);
    }
}

/// Writes all of `bytes` and flushes.
pub fn send<C: Write>(connection: &mut C, bytes: &[u8]) -> io::Result<()> {
    connection.write_all(bytes)?;
    connection.flush()
}

/// Reads fixed-size chunks until the peer closes.
///
/// A TLS peer that closes without `close_notify` surfaces as `UnexpectedEof`;
/// after any data has arrived that counts as the end of the response.
pub fn receive_until_closed<C: Read>(connection: &mut C) -> io::Result<Vec<u8>> {
    let mut response = Vec::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    loop {
        match connection.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => response.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof && !response.is_empty() => break,
            Err(e) => return Err(e),
        }
    }
    Ok(response)
}
