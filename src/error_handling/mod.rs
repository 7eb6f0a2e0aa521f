//! Error handling.
//!
//! This module provides:
//! - The typed error returned by every fallible library operation
//! - A per-variant cause category with stable process exit codes
//! - Initialization errors for the binary's setup steps

mod types;

// Re-export public API
pub use types::{ErrorType, HttpClientError, InitializationError};
