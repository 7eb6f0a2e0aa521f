//! Configuration constants.
//!
//! This module defines the defaults used when a request is built without an
//! explicit value, and the fixed parameters of the wire layer.

use std::time::Duration;

/// Protocol token written on the request line when none is given.
pub const DEFAULT_PROTOCOL: &str = "HTTP/1.1";

/// Default number of redirects a client follows before failing.
pub const DEFAULT_MAX_REDIRECTS: u32 = 50;

/// Default socket timeout in seconds.
/// Bounds each blocking call (connect, send, one receive), not the whole redirect chain.
pub const DEFAULT_TIMEOUT_SECS: &str = "1000";

/// Default socket timeout as a `Duration`.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1000);

/// Number of bytes requested from the transport per receive call.
pub const READ_CHUNK_SIZE: usize = 1024;

/// Charset reported when `Content-Type` is present but carries no `charset=` parameter.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Value of the `Connection` header on every request (no keep-alive).
pub const CONNECTION_CLOSE: &str = "close";

/// Separator between the head section and the body in a message.
pub const HEAD_BODY_SEPARATOR: &[u8] = b"\r\n\r\n";

/// Line terminator used in the head section.
pub const CRLF: &str = "\r\n";
