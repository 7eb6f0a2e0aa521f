//! HTTP header name constants.
//!
//! Names are written with the casing they carry on the wire. Lookups against a
//! `HeaderMap` are case-insensitive, so these constants also match lower-cased
//! response headers.

/// Target host (and non-default port) of the request
pub const HEADER_HOST: &str = "Host";
/// Connection management; always `close`
pub const HEADER_CONNECTION: &str = "Connection";
/// Cookie value from `--cookie` or a cookie file
pub const HEADER_COOKIE: &str = "Cookie";
/// Client identification
pub const HEADER_USER_AGENT: &str = "User-Agent";
/// Previous URL supplied by the caller.
///
/// The client has always sent this name instead of the standard `Referer`, and
/// servers it talks to rely on it, so the spelling stays.
pub const HEADER_REFERENCE: &str = "Reference";
/// Media type of the body, optionally with a `charset=` parameter
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
/// Byte length of the body; always emitted on requests
pub const HEADER_CONTENT_LENGTH: &str = "Content-Length";
/// Redirect target
pub const HEADER_LOCATION: &str = "Location";
