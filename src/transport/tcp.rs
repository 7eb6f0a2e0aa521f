//! Plain TCP connections.

use std::io::{self, ErrorKind};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::debug;

/// Resolves `host` and connects to the first address that accepts.
///
/// `timeout` bounds each connect attempt and becomes the socket's read and
/// write timeout. A zero timeout means blocking without a bound.
///
/// # Errors
///
/// Returns the resolution error, or the error of the last address tried.
pub fn connect_tcp(host: &str, port: u16, timeout: Duration) -> io::Result<TcpStream> {
    let timeout = (!timeout.is_zero()).then_some(timeout);
    let mut last_error = None;

    for addr in (host, port).to_socket_addrs()? {
        debug!("Attempting to connect to {addr} ({host})");
        let attempt = match timeout {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
            None => TcpStream::connect(addr),
        };
        match attempt {
            Ok(stream) => {
                stream.set_read_timeout(timeout)?;
                stream.set_write_timeout(timeout)?;
                return Ok(stream);
            }
            Err(e) => {
                debug!("Failed to connect to {addr}: {e}");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        io::Error::new(
            ErrorKind::NotFound,
            format!("no addresses resolved for {host}"),
        )
    }))
}
