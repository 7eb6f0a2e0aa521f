//! Redirect decisions.
//!
//! After each response the client decides whether to return it, follow its
//! `Location`, or give up because the hop budget is spent.

use log::warn;

use crate::response::Response;

/// What the client does with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HopDecision {
    /// Not a redirect, or a redirect with nowhere to go.
    Return,
    /// Send the request again to the response's `Location`.
    Follow,
    /// Still redirecting with no budget left.
    LimitExceeded,
}

/// Decides the next step for `response` given the remaining `hop_budget`.
///
/// A spent budget fails on any redirect condition, `Location` or not. With
/// budget left, a 3xx without `Location` is returned as-is.
pub(crate) fn decide(response: &Response, hop_budget: u32) -> HopDecision {
    if !response.is_redirect() {
        return HopDecision::Return;
    }
    if hop_budget == 0 {
        return HopDecision::LimitExceeded;
    }
    if response.location().is_empty() {
        warn!(
            "Redirect status {} for {} but no Location header",
            response.status_code(),
            response
                .request()
                .map(|request| request.url().as_str())
                .unwrap_or("<unknown>")
        );
        return HopDecision::Return;
    }
    HopDecision::Follow
}
