//! TCP/TLS transport used by the command-line client.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use log::debug;

use super::tcp::connect_tcp;
use super::tls::{TlsConnector, TlsStream};
use super::{Target, Transport};
use crate::error_handling::HttpClientError;

/// A connection opened by [`NetworkTransport`].
#[derive(Debug)]
pub enum NetworkStream {
    Plain(TcpStream),
    Tls(Box<TlsStream>),
}

impl Read for NetworkStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            NetworkStream::Plain(stream) => stream.read(buf),
            NetworkStream::Tls(stream) => stream.read(buf),
        }
    }
}

impl Write for NetworkStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            NetworkStream::Plain(stream) => stream.write(buf),
            NetworkStream::Tls(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            NetworkStream::Plain(stream) => stream.flush(),
            NetworkStream::Tls(stream) => stream.flush(),
        }
    }
}

/// Connects over TCP and upgrades `https` targets to TLS.
#[derive(Clone, Debug)]
pub struct NetworkTransport {
    tls: TlsConnector,
}

impl NetworkTransport {
    pub fn new(tls: TlsConnector) -> Self {
        NetworkTransport { tls }
    }
}

impl Default for NetworkTransport {
    fn default() -> Self {
        NetworkTransport::new(TlsConnector::with_webpki_roots())
    }
}

impl Transport for NetworkTransport {
    type Connection = NetworkStream;

    fn connect(&self, target: &Target, timeout: Duration) -> Result<NetworkStream, HttpClientError> {
        let failed = |e| HttpClientError::connection(&target.host, target.port, e);

        let tcp = connect_tcp(&target.host, target.port, timeout).map_err(failed)?;
        if !target.secure {
            return Ok(NetworkStream::Plain(tcp));
        }
        let tls = self.tls.upgrade(&target.host, tcp).map_err(failed)?;
        Ok(NetworkStream::Tls(Box::new(tls)))
    }

    fn close(&self, connection: NetworkStream) {
        let result = match connection {
            NetworkStream::Plain(stream) => stream.shutdown(Shutdown::Both),
            NetworkStream::Tls(mut stream) => {
                stream.conn.send_close_notify();
                // Best effort: the peer has usually closed already.
                let _ = stream.conn.complete_io(&mut stream.sock);
                stream.sock.shutdown(Shutdown::Both)
            }
        };
        if let Err(e) = result {
            debug!("Ignoring error while closing connection: {e}");
        }
    }
}
