//! http_client library: a minimal blocking HTTP(S) client
//!
//! Builds HTTP/1.x requests from a URL and a few inputs, sends each one on a
//! fresh TCP (or TLS) connection with `Connection: close`, reads until the
//! server closes, and follows redirects up to a hop budget.
//!
//! # Example
//!
//! ```no_run
//! use http_client::initialization::init_crypto_provider;
//! use http_client::{Client, Request};
//!
//! # fn main() -> Result<(), http_client::HttpClientError> {
//! init_crypto_provider();
//! let request = Request::builder("https://example.com/")
//!     .user_agent("http_client/0.1")
//!     .build()?;
//!
//! let mut client = Client::new().with_max_hops(5);
//! let response = client.do_request(request)?;
//! println!("{} ({} bytes)", response.status_line(), response.body().len());
//! # Ok(())
//! # }
//! ```

pub mod app;
mod client;
pub mod config;
pub mod encoding;
mod error_handling;
mod headers;
pub mod initialization;
mod request;
mod response;
pub mod transport;

// Re-export public API
pub use client::Client;
pub use config::{LogFormat, LogLevel, Opt, OutputMode};
pub use error_handling::{ErrorType, HttpClientError, InitializationError};
pub use headers::{HeaderMap, HeaderName};
pub use request::{BodySource, HeaderOverrides, Method, Request, RequestBuilder};
pub use response::Response;
pub use transport::{NetworkTransport, Target, Transport};
