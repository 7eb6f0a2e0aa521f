//! Response model.
//!
//! Parses the raw bytes read from a connection into status line fields, a
//! header map and a body. `charset` and `location` are derived from the headers
//! on first access and cached.

mod patterns;


use std::sync::{Arc, OnceLock};

use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::config::{DEFAULT_CHARSET, HEADER_CONTENT_TYPE, HEADER_LOCATION, HEAD_BODY_SEPARATOR};
use crate::encoding;
use crate::error_handling::HttpClientError;
use crate::headers::HeaderMap;
use crate::request::Request;

use patterns::{CHARSET_RE, HEADER_LINE_RE, STATUS_LINE_RE};

/// A parsed HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    protocol: String,
    protocol_version: f64,
    status_code: u16,
    reason: String,
    headers: HeaderMap,
    body: Vec<u8>,
    raw: Vec<u8>,
    charset: OnceLock<String>,
    location: OnceLock<String>,
    request: Option<Arc<Request>>,
}

impl Response {
    /// Parses a response that answered `request`.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientError::MalformedStatusLine` if the first line is not
    /// `{protocol} {code} {message}`.
    pub fn from_bytes(raw: Vec<u8>, request: Arc<Request>) -> Result<Self, HttpClientError> {
        let mut response = Self::parse(raw)?;
        response.request = Some(request);
        Ok(response)
    }

    /// Parses a response with no originating request attached.
    ///
    /// Everything after the first blank line is the body, verbatim. Head lines
    /// that are not `Name: value` are skipped. A buffer without a blank line is
    /// all head.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientError::MalformedStatusLine` if the first line is not
    /// `{protocol} {code} {message}`.
    pub fn parse(raw: Vec<u8>) -> Result<Self, HttpClientError> {
        let (head_bytes, body) = match find_subslice(&raw, HEAD_BODY_SEPARATOR) {
            Some(index) => (
                &raw[..index],
                raw[index + HEAD_BODY_SEPARATOR.len()..].to_vec(),
            ),
            None => (&raw[..], Vec::new()),
        };
        let head = encoding::decode(head_bytes);
        let mut lines = head.lines();

        let status_line = lines.next().unwrap_or_default();
        let malformed = || HttpClientError::MalformedStatusLine(status_line.to_string());
        let caps = STATUS_LINE_RE.captures(status_line).ok_or_else(malformed)?;
        let protocol = caps["protocol"].to_string();
        let protocol_version: f64 = caps["version"].parse().map_err(|_| malformed())?;
        let status_code: u16 = caps["code"].parse().map_err(|_| malformed())?;
        let reason = caps
            .name("reason")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        let mut headers = HeaderMap::new();
        for line in lines {
            match HEADER_LINE_RE.captures(line) {
                Some(caps) => headers.set(&caps["name"], &caps["value"]),
                None if line.trim().is_empty() => {}
                None => log::warn!("Skipping malformed header line: {line:?}"),
            }
        }

        Ok(Response {
            protocol,
            protocol_version,
            status_code,
            reason,
            headers,
            body,
            raw,
            charset: OnceLock::new(),
            location: OnceLock::new(),
            request: None,
        })
    }

    /// Protocol token of the status line, e.g. `HTTP/1.1`.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Numeric protocol version, e.g. `1.1`.
    pub fn protocol_version(&self) -> f64 {
        self.protocol_version
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Status message; empty when the server sent none.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Every byte read from the connection.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The request this response answered, if attached.
    pub fn request(&self) -> Option<&Request> {
        self.request.as_deref()
    }

    /// The `charset=` parameter of `Content-Type`.
    ///
    /// `utf-8` when `Content-Type` has no such parameter, empty when there is
    /// no `Content-Type` at all.
    pub fn charset(&self) -> &str {
        self.charset.get_or_init(|| match self.headers.get(HEADER_CONTENT_TYPE) {
            None => String::new(),
            Some(content_type) => CHARSET_RE
                .captures(content_type)
                .map(|caps| caps["charset"].to_string())
                .unwrap_or_else(|| DEFAULT_CHARSET.to_string()),
        })
    }

    /// The `Location` header, or an empty string.
    pub fn location(&self) -> &str {
        self.location.get_or_init(|| {
            self.headers
                .get(HEADER_LOCATION)
                .unwrap_or_default()
                .to_string()
        })
    }

    /// 3xx status, or any response carrying a `Location`.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status_code) || !self.location().is_empty()
    }

    /// `{protocol} {code} {reason}` without a trailing blank when the reason is empty.
    pub fn status_line(&self) -> String {
        format!("{} {} {}", self.protocol, self.status_code, self.reason)
            .trim_end()
            .to_string()
    }

    /// Body decoded per `charset`.
    ///
    /// The charset is looked up as a WHATWG encoding label; an empty or
    /// unknown label decodes as UTF-8. Malformed sequences become U+FFFD.
    pub fn text(&self) -> String {
        let encoding = Encoding::for_label(self.charset().trim().as_bytes()).unwrap_or_else(|| {
            if !self.charset().is_empty() {
                debug!("Unknown charset {:?}, decoding body as UTF-8", self.charset());
            }
            UTF_8
        });
        let (text, had_errors) = encoding.decode_without_bom_handling(&self.body);
        if had_errors {
            debug!("Body is not valid {}; replaced malformed bytes", encoding.name());
        }
        text.into_owned()
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
