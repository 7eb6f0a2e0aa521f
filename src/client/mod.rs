//! Request execution with redirect following.
//!
//! [`Client::do_request`] runs one attempt per hop: connect, send the request
//! bytes, read until the server closes, parse. A redirect response is followed
//! by building a new request from its `Location`; the hop budget bounds how many
//! times that happens.

mod redirects;


use std::sync::Arc;

use log::{debug, info, warn};
use url::Url;

use crate::config::DEFAULT_MAX_REDIRECTS;
use crate::error_handling::HttpClientError;
use crate::request::Request;
use crate::response::Response;
use crate::transport::{receive_until_closed, send, NetworkTransport, Target, Transport};

use redirects::{decide, HopDecision};

/// Executes requests over a [`Transport`], following redirects.
#[derive(Debug)]
pub struct Client<T: Transport = NetworkTransport> {
    transport: T,
    max_hops: u32,
    hop_budget: u32,
    redirect_chain: Vec<Url>,
}

impl Client<NetworkTransport> {
    /// Client over TCP/TLS with the default redirect limit.
    pub fn new() -> Self {
        Client::with_transport(NetworkTransport::default())
    }
}

impl Default for Client<NetworkTransport> {
    fn default() -> Self {
        Client::new()
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T) -> Self {
        Client {
            transport,
            max_hops: DEFAULT_MAX_REDIRECTS,
            hop_budget: DEFAULT_MAX_REDIRECTS,
            redirect_chain: Vec::new(),
        }
    }

    /// Sets how many redirects one `do_request` call may follow.
    pub fn with_max_hops(mut self, max_hops: u32) -> Self {
        self.max_hops = max_hops;
        self.hop_budget = max_hops;
        self
    }

    pub fn max_hops(&self) -> u32 {
        self.max_hops
    }

    /// Redirects still allowed in the current (or last) call.
    pub fn hop_budget(&self) -> u32 {
        self.hop_budget
    }

    /// URLs requested by the last call, in order, ending with the final one.
    pub fn redirect_chain(&self) -> &[Url] {
        &self.redirect_chain
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `request`, following redirects until a final response.
    ///
    /// The hop budget is reset at the start of every call to the smaller of
    /// the client's `max_hops` and the request's own redirect budget.
    ///
    /// # Errors
    ///
    /// - `ConnectionFailed` when connecting, sending or receiving fails
    /// - `MalformedStatusLine` when a response cannot be parsed
    /// - `InvalidUrl` / `UnsupportedScheme` for an unusable `Location`
    /// - `RedirectLimitExceeded` (carrying the original URL) when the server is
    ///   still redirecting after the budget is spent
    pub fn do_request(&mut self, request: Request) -> Result<Response, HttpClientError> {
        self.hop_budget = self.max_hops.min(request.redirect_budget());
        self.redirect_chain.clear();

        let original_url = request.url().to_string();
        let mut current = Arc::new(request);

        loop {
            self.redirect_chain.push(current.url().clone());
            let raw = self.round_trip(&current)?;
            let response = Response::from_bytes(raw, Arc::clone(&current))?;
            debug!("{} -> {}", current.url(), response.status_line());

            match decide(&response, self.hop_budget) {
                HopDecision::Return => return Ok(response),
                HopDecision::LimitExceeded => {
                    warn!(
                        "Redirect limit of {} exceeded for {original_url}",
                        self.max_hops
                    );
                    return Err(HttpClientError::RedirectLimitExceeded(original_url));
                }
                HopDecision::Follow => {
                    self.hop_budget -= 1;
                    let next = current
                        .follow(response.location())?
                        .with_redirect_budget(self.hop_budget);
                    info!(
                        "Following {} redirect {} -> {} ({} hops left)",
                        response.status_code(),
                        current.url(),
                        next.url(),
                        self.hop_budget
                    );
                    current = Arc::new(next);
                }
            }
        }
    }

    /// One attempt on a fresh connection; the connection is closed on every path.
    fn round_trip(&self, request: &Request) -> Result<Vec<u8>, HttpClientError> {
        let target = Target::of(request);
        debug!("Connecting to {target}");
        let mut connection = self.transport.connect(&target, request.timeout())?;

        let result = send(&mut connection, &request.to_bytes())
            .and_then(|()| receive_until_closed(&mut connection));
        self.transport.close(connection);

        let raw = result.map_err(|e| HttpClientError::connection(&target.host, target.port, e))?;
        debug!("Received {} bytes from {target}", raw.len());
        Ok(raw)
    }
}
