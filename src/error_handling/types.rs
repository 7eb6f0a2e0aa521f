//! Error type definitions.
//!
//! This module defines the typed failures of the client. Every failure reaches the
//! caller as a distinct variant so callers can branch on cause; nothing is retried.

use std::path::PathBuf;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Failures of request construction, transport, response parsing and redirect following.
#[derive(Error, Debug)]
pub enum HttpClientError {
    /// The method token is not one of the supported methods.
    #[error("{0} the request type does not exist. See help")]
    InvalidMethod(String),

    /// A body or cookie source path exists (or was named explicitly) but cannot be read.
    #[error("Unable to read the file {}: {source}", path.display())]
    UnreadableSource {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The named cookie file does not exist.
    #[error("Cookie file {} does not exist", .0.display())]
    MissingCookieFile(PathBuf),

    /// Connecting, the TLS handshake, sending or receiving failed.
    #[error("not connect to the server, check URL {host}: {port}")]
    ConnectionFailed {
        /// Target host
        host: String,
        /// Target port
        port: u16,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The response does not start with a `{protocol} {code} {message}` line.
    #[error("Malformed status line: {0:?}")]
    MalformedStatusLine(String),

    /// The hop budget ran out while the server kept redirecting.
    #[error("Redirect limit exceeded for {0}")]
    RedirectLimitExceeded(String),

    /// A URL (initial or from `Location`) could not be parsed.
    #[error("Invalid URL {url:?}: {source}")]
    InvalidUrl {
        /// The text that failed to parse
        url: String,
        /// Parser failure
        #[source]
        source: url::ParseError,
    },

    /// Only `http` and `https` can be requested.
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Cause categories of [`HttpClientError`], one per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    InvalidMethod,
    UnreadableSource,
    MissingCookieFile,
    ConnectionFailed,
    MalformedStatusLine,
    RedirectLimitExceeded,
    InvalidUrl,
    UnsupportedScheme,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidMethod => "Invalid request method",
            ErrorType::UnreadableSource => "Unreadable file",
            ErrorType::MissingCookieFile => "Missing cookie file",
            ErrorType::ConnectionFailed => "Connection failed",
            ErrorType::MalformedStatusLine => "Malformed status line",
            ErrorType::RedirectLimitExceeded => "Redirect limit exceeded",
            ErrorType::InvalidUrl => "Invalid URL",
            ErrorType::UnsupportedScheme => "Unsupported URL scheme",
        }
    }

    /// Process exit code used by the binary for this cause. Never 0 or 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorType::InvalidMethod => 2,
            ErrorType::UnreadableSource => 3,
            ErrorType::MissingCookieFile => 4,
            ErrorType::ConnectionFailed => 5,
            ErrorType::MalformedStatusLine => 6,
            ErrorType::RedirectLimitExceeded => 7,
            ErrorType::InvalidUrl => 8,
            ErrorType::UnsupportedScheme => 9,
        }
    }
}

impl HttpClientError {
    /// Category of this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            HttpClientError::InvalidMethod(_) => ErrorType::InvalidMethod,
            HttpClientError::UnreadableSource { .. } => ErrorType::UnreadableSource,
            HttpClientError::MissingCookieFile(_) => ErrorType::MissingCookieFile,
            HttpClientError::ConnectionFailed { .. } => ErrorType::ConnectionFailed,
            HttpClientError::MalformedStatusLine(_) => ErrorType::MalformedStatusLine,
            HttpClientError::RedirectLimitExceeded(_) => ErrorType::RedirectLimitExceeded,
            HttpClientError::InvalidUrl { .. } => ErrorType::InvalidUrl,
            HttpClientError::UnsupportedScheme(_) => ErrorType::UnsupportedScheme,
        }
    }

    /// Shorthand for `self.error_type().exit_code()`.
    pub fn exit_code(&self) -> i32 {
        self.error_type().exit_code()
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HttpClientError::UnreadableSource {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn connection(host: &str, port: u16, source: std::io::Error) -> Self {
        HttpClientError::ConnectionFailed {
            host: host.to_string(),
            port,
            source,
        }
    }
}
