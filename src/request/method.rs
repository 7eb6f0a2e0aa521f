//! Request methods.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::error_handling::HttpClientError;

/// The fixed set of methods a request can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Connect,
    Trace,
}

impl Method {
    /// Parses a method token, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientError::InvalidMethod` with the upper-cased token when it
    /// names no known method.
    pub fn parse(token: &str) -> Result<Self, HttpClientError> {
        token
            .trim()
            .parse()
            .map_err(|_| HttpClientError::InvalidMethod(token.trim().to_uppercase()))
    }
}
