//! Request model.
//!
//! A [`Request`] holds everything needed to write one HTTP request on the wire:
//! method, URL, protocol token, derived headers and the resolved body. Headers
//! are derived from a [`HeaderOverrides`] value and the URL, always from scratch
//! and in a fixed order, so the same inputs give the same bytes.

mod body;
mod method;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::config::{
    CONNECTION_CLOSE, CRLF, DEFAULT_MAX_REDIRECTS, DEFAULT_PROTOCOL, DEFAULT_TIMEOUT,
    HEADER_CONNECTION, HEADER_CONTENT_LENGTH, HEADER_COOKIE, HEADER_HOST, HEADER_REFERENCE,
    HEADER_USER_AGENT,
};
use crate::encoding;
use crate::error_handling::HttpClientError;
use crate::headers::HeaderMap;

pub use body::BodySource;
pub use method::Method;

/// Inputs of header derivation supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOverrides {
    /// Raw `Name: value` lines, applied first
    pub raw_headers: Vec<String>,
    /// Previous URL, sent as `Reference`
    pub reference: Option<String>,
    /// `Cookie` value
    pub cookie: Option<String>,
    /// `User-Agent` value
    pub user_agent: Option<String>,
    /// File whose contents replace the `Cookie` value
    pub cookie_file: Option<PathBuf>,
}

/// A fully derived HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    url: Url,
    method: Method,
    protocol: String,
    overrides: HeaderOverrides,
    headers: HeaderMap,
    body: Vec<u8>,
    timeout: Duration,
    redirect_budget: u32,
}

impl Request {
    /// Starts building a request for `url`.
    pub fn builder(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url)
    }

    fn from_parts(
        url: Url,
        method: Method,
        protocol: String,
        overrides: HeaderOverrides,
        body: Vec<u8>,
        timeout: Duration,
        redirect_budget: u32,
    ) -> Result<Self, HttpClientError> {
        check_scheme(&url)?;
        let headers = derive_headers(&url, &overrides)?;
        Ok(Request {
            url,
            method,
            protocol,
            overrides,
            headers,
            body,
            timeout,
            redirect_budget,
        })
    }

    /// Replaces the header inputs and derives the headers again.
    ///
    /// # Errors
    ///
    /// Fails like construction does on a missing or unreadable cookie file.
    pub fn with_header_overrides(self, overrides: HeaderOverrides) -> Result<Self, HttpClientError> {
        let headers = derive_headers(&self.url, &overrides)?;
        Ok(Request {
            overrides,
            headers,
            ..self
        })
    }

    /// Points the request at another URL and derives the headers again (`Host` follows the URL).
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedScheme` for schemes other than `http`/`https`, or a
    /// cookie file error from header derivation.
    pub fn with_url(self, url: Url) -> Result<Self, HttpClientError> {
        check_scheme(&url)?;
        let headers = derive_headers(&url, &self.overrides)?;
        Ok(Request {
            url,
            headers,
            ..self
        })
    }

    /// Replaces the method.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMethod` for an unknown token.
    pub fn with_method(self, token: &str) -> Result<Self, HttpClientError> {
        let method = Method::parse(token)?;
        Ok(Request { method, ..self })
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Request { timeout, ..self }
    }

    pub fn with_redirect_budget(self, redirect_budget: u32) -> Self {
        Request {
            redirect_budget,
            ..self
        }
    }

    /// Builds the request that follows a redirect to `location`.
    ///
    /// A relative `location` is resolved against this request's URL. Method,
    /// protocol, header inputs, body and timeout carry over; the redirect budget
    /// is one less than this request's.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` when `location` cannot be resolved, `UnsupportedScheme`
    /// when it leaves http/https, or a cookie file error.
    pub fn follow(&self, location: &str) -> Result<Request, HttpClientError> {
        let url = Url::parse(location)
            .or_else(|_| self.url.join(location))
            .map_err(|source| HttpClientError::InvalidUrl {
                url: location.to_string(),
                source,
            })?;
        Request::from_parts(
            url,
            self.method,
            self.protocol.clone(),
            self.overrides.clone(),
            self.body.clone(),
            self.timeout,
            self.redirect_budget.saturating_sub(1),
        )
    }

    /// Serializes the request to wire bytes.
    ///
    /// Request line, derived headers in order, `Content-Length` of the body
    /// (also when zero), blank line, body. Everything before the body is written
    /// in the single-byte encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!(
            "{} {} {}{CRLF}",
            self.method,
            self.request_target(),
            self.protocol
        );
        self.headers.write_wire_lines(&mut head);
        head.push_str(&format!(
            "{HEADER_CONTENT_LENGTH}: {}{CRLF}",
            self.body.len()
        ));
        head.push_str(CRLF);

        let mut bytes = encoding::encode(&head);
        bytes.extend_from_slice(&self.body);
        bytes
    }

    /// Path plus `?query` when the URL has one.
    pub fn request_target(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header_overrides(&self) -> &HeaderOverrides {
        &self.overrides
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn redirect_budget(&self) -> u32 {
        self.redirect_budget
    }

    pub fn reference(&self) -> Option<&str> {
        self.overrides.reference.as_deref()
    }

    pub fn cookie(&self) -> Option<&str> {
        self.overrides.cookie.as_deref()
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.overrides.user_agent.as_deref()
    }

    pub fn cookie_file(&self) -> Option<&std::path::Path> {
        self.overrides.cookie_file.as_deref()
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Explicit port, or 80/443 from the scheme.
    pub fn port(&self) -> u16 {
        self.url
            .port_or_known_default()
            .unwrap_or(if self.is_secure() { 443 } else { 80 })
    }

    /// Whether the connection must be wrapped in TLS.
    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "https"
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encoding::decode(&self.to_bytes()))
    }
}

fn check_scheme(url: &Url) -> Result<(), HttpClientError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(HttpClientError::UnsupportedScheme(other.to_string())),
    }
}

fn host_header(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

fn set_if_present(headers: &mut HeaderMap, name: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        headers.set(name, value);
    }
}

/// Derives request headers. Order: raw lines, `Reference`, `Cookie`,
/// `User-Agent`, `Host`, `Connection`, then the cookie file.
fn derive_headers(url: &Url, overrides: &HeaderOverrides) -> Result<HeaderMap, HttpClientError> {
    let mut headers = HeaderMap::new();

    for line in &overrides.raw_headers {
        match line.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => {
                headers.set(name.trim(), value.trim());
            }
            _ => log::warn!("Skipping header line without a name: {line:?}"),
        }
    }
    // Content-Length is always computed from the body at serialization.
    if headers.remove(HEADER_CONTENT_LENGTH).is_some() {
        log::debug!("Dropping caller-supplied {HEADER_CONTENT_LENGTH} header");
    }

    set_if_present(&mut headers, HEADER_REFERENCE, overrides.reference.as_deref());
    set_if_present(&mut headers, HEADER_COOKIE, overrides.cookie.as_deref());
    set_if_present(&mut headers, HEADER_USER_AGENT, overrides.user_agent.as_deref());
    headers.set(HEADER_HOST, host_header(url));
    headers.set(HEADER_CONNECTION, CONNECTION_CLOSE);

    if let Some(path) = &overrides.cookie_file {
        if !path.exists() {
            return Err(HttpClientError::MissingCookieFile(path.clone()));
        }
        let contents = body::read_all(path)?;
        headers.set(HEADER_COOKIE, fold_cookie_lines(&encoding::decode(&contents)));
    }

    Ok(headers)
}

/// Joins the non-blank lines of a cookie file with `; ` so no CR or LF reaches the head.
fn fold_cookie_lines(contents: &str) -> String {
    contents
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Builder for [`Request`]; all inputs are validated in [`RequestBuilder::build`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: String,
    method: String,
    protocol: String,
    overrides: HeaderOverrides,
    body: BodySource,
    timeout: Duration,
    redirect_budget: u32,
}

impl RequestBuilder {
    fn new(url: impl Into<String>) -> Self {
        RequestBuilder {
            url: url.into(),
            method: Method::Get.to_string(),
            protocol: DEFAULT_PROTOCOL.to_string(),
            overrides: HeaderOverrides::default(),
            body: BodySource::Empty,
            timeout: DEFAULT_TIMEOUT,
            redirect_budget: DEFAULT_MAX_REDIRECTS,
        }
    }

    pub fn method(mut self, token: impl Into<String>) -> Self {
        self.method = token.into();
        self
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Adds one raw `Name: value` line.
    pub fn header(mut self, line: impl Into<String>) -> Self {
        self.overrides.raw_headers.push(line.into());
        self
    }

    /// Replaces all header inputs at once.
    pub fn header_overrides(mut self, overrides: HeaderOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.overrides.reference = Some(reference.into());
        self
    }

    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.overrides.cookie = Some(cookie.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.overrides.user_agent = Some(user_agent.into());
        self
    }

    pub fn cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.overrides.cookie_file = Some(path.into());
        self
    }

    pub fn body(mut self, body: BodySource) -> Self {
        self.body = body;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn redirect_budget(mut self, redirect_budget: u32) -> Self {
        self.redirect_budget = redirect_budget;
        self
    }

    /// Validates the inputs, resolves the body and derives the headers.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` / `UnsupportedScheme` for the URL
    /// - `InvalidMethod` for the method token
    /// - `UnreadableSource` for a body file, or a cookie file that cannot be read
    /// - `MissingCookieFile` when the cookie file does not exist
    pub fn build(self) -> Result<Request, HttpClientError> {
        let url = Url::parse(&self.url).map_err(|source| HttpClientError::InvalidUrl {
            url: self.url.clone(),
            source,
        })?;
        let method = Method::parse(&self.method)?;
        let body = self.body.resolve()?;
        Request::from_parts(
            url,
            method,
            self.protocol,
            self.overrides,
            body,
            self.timeout,
            self.redirect_budget,
        )
    }
}
