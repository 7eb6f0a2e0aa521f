//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_PROTOCOL, DEFAULT_TIMEOUT_SECS};
use crate::error_handling::HttpClientError;
use crate::request::{BodySource, HeaderOverrides, Request};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the final response is written out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Status line, headers, blank line, body
    Full,
    /// Status line and headers only
    HeadOnly,
    /// Body only
    BodyOnly,
    /// Serialized request followed by the full response
    Verbose,
    /// Raw body bytes written to a file
    File(PathBuf),
}

/// Command-line options for the client binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "http_client", version, about = "HTTP(S) Client")]
pub struct Opt {
    /// URL (link to resource)
    pub url: String,

    /// Request method: GET | POST | PUT | CONNECT | PATCH | OPTIONS | DELETE | HEAD | TRACE
    #[arg(short = 'x', long = "request", default_value = "GET")]
    pub method: String,

    /// Literal request body
    #[arg(short = 'd', long, conflicts_with = "file")]
    pub data: Option<String>,

    /// Read the request body from a file
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Previous URL, sent as the `Reference` header
    #[arg(short = 'l', long)]
    pub reference: Option<String>,

    /// Cookie header value
    #[arg(short = 'c', long)]
    pub cookie: Option<String>,

    /// Read the cookie header value from a file
    #[arg(short = 'C', long)]
    pub cookie_file: Option<PathBuf>,

    /// User-Agent header value
    #[arg(short = 'a', long)]
    pub agent: Option<String>,

    /// Extra request header as a `Name: value` line; repeat for more
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Socket timeout in seconds for each blocking call
    #[arg(short = 't', long, default_value = DEFAULT_TIMEOUT_SECS, value_parser = parse_timeout)]
    pub timeout: Duration,

    /// Protocol token for the request line
    #[arg(short = 'p', long, default_value = DEFAULT_PROTOCOL)]
    pub protocol: String,

    /// Maximum number of redirects to follow
    #[arg(short = 'g', long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub redirect: u32,

    /// Write the response body to a file
    #[arg(short = 'O', long)]
    pub output: Option<PathBuf>,

    /// Print the request along with the response
    #[arg(short = 'v', long, conflicts_with_all = ["head_ignore", "body_ignore"])]
    pub verbose: bool,

    /// Print the body only
    #[arg(short = '1', long)]
    pub head_ignore: bool,

    /// Print the status line and headers only
    #[arg(short = '0', long)]
    pub body_ignore: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number of seconds"))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("timeout must be greater than 0, got {raw}"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("timeout {raw} is out of range: {e}"))
}

impl Opt {
    /// Picks the output mode. `--body-ignore` wins over `--head-ignore`,
    /// which wins over `--verbose`, which wins over `--output`.
    pub fn output_mode(&self) -> OutputMode {
        if self.body_ignore {
            OutputMode::HeadOnly
        } else if self.head_ignore {
            OutputMode::BodyOnly
        } else if self.verbose {
            OutputMode::Verbose
        } else if let Some(path) = &self.output {
            OutputMode::File(path.clone())
        } else {
            OutputMode::Full
        }
    }

    /// Inputs of header derivation taken from the options.
    pub fn header_overrides(&self) -> HeaderOverrides {
        HeaderOverrides {
            raw_headers: self.headers.clone(),
            reference: self.reference.clone(),
            cookie: self.cookie.clone(),
            user_agent: self.agent.clone(),
            cookie_file: self.cookie_file.clone(),
        }
    }

    /// Body source selected by `--data` or `--file`.
    pub fn body_source(&self) -> BodySource {
        match (&self.data, &self.file) {
            (Some(data), _) if !data.is_empty() => BodySource::Literal(data.as_bytes().to_vec()),
            (_, Some(path)) => BodySource::File(path.clone()),
            _ => BodySource::Empty,
        }
    }

    /// Builds the initial request from the options.
    ///
    /// # Errors
    ///
    /// Returns any construction error of [`Request`]: bad URL or scheme, unknown
    /// method, unreadable body or cookie file.
    pub fn to_request(&self) -> Result<Request, HttpClientError> {
        Request::builder(&self.url)
            .method(&self.method)
            .protocol(&self.protocol)
            .header_overrides(self.header_overrides())
            .body(self.body_source())
            .timeout(self.timeout)
            .redirect_budget(self.redirect)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Opt {
        let mut full = vec!["http_client"];
        full.extend_from_slice(args);
        Opt::try_parse_from(full).expect("arguments should parse")
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_defaults() {
        let opt = parse(&["http://example.com/"]);
        assert_eq!(opt.method, "GET");
        assert_eq!(opt.protocol, DEFAULT_PROTOCOL);
        assert_eq!(opt.redirect, DEFAULT_MAX_REDIRECTS);
        assert_eq!(opt.timeout, crate::config::DEFAULT_TIMEOUT);
        assert_eq!(opt.output_mode(), OutputMode::Full);
        assert_eq!(opt.body_source(), BodySource::Empty);
    }

    #[test]
    fn test_output_mode_precedence() {
        assert_eq!(
            parse(&["-0", "-1", "http://example.com/"]).output_mode(),
            OutputMode::HeadOnly
        );
        assert_eq!(
            parse(&["-1", "http://example.com/"]).output_mode(),
            OutputMode::BodyOnly
        );
        assert_eq!(
            parse(&["-v", "-O", "out.html", "http://example.com/"]).output_mode(),
            OutputMode::Verbose
        );
        assert_eq!(
            parse(&["-O", "out.html", "http://example.com/"]).output_mode(),
            OutputMode::File(PathBuf::from("out.html"))
        );
    }

    #[test]
    fn test_verbose_conflicts_with_ignore_flags() {
        assert!(Opt::try_parse_from(["http_client", "-v", "-1", "http://example.com/"]).is_err());
        assert!(Opt::try_parse_from(["http_client", "-v", "-0", "http://example.com/"]).is_err());
    }

    #[test]
    fn test_data_conflicts_with_file() {
        let result =
            Opt::try_parse_from(["http_client", "-d", "x", "-f", "body.txt", "http://example.com/"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_positive_timeout() {
        assert!(Opt::try_parse_from(["http_client", "-t", "0", "http://example.com/"]).is_err());
        assert!(Opt::try_parse_from(["http_client", "-t", "abc", "http://example.com/"]).is_err());
    }

    #[test]
    fn test_rejects_timeout_too_large_for_duration() {
        let err = Opt::try_parse_from(["http_client", "-t", "1e30", "http://example.com/"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(parse_timeout("1e30").unwrap_err().contains("out of range"));
    }

    #[test]
    fn test_fractional_timeout_parses_to_duration() {
        assert_eq!(parse_timeout("0.25"), Ok(Duration::from_millis(250)));
    }

    #[test]
    fn test_body_source_mapping() {
        let literal = parse(&["-d", "a=1", "http://example.com/"]);
        assert_eq!(literal.body_source(), BodySource::Literal(b"a=1".to_vec()));

        let file = parse(&["-f", "body.txt", "http://example.com/"]);
        assert_eq!(file.body_source(), BodySource::File(PathBuf::from("body.txt")));
    }

    #[test]
    fn test_to_request_applies_options() {
        let opt = parse(&[
            "-x",
            "post",
            "-d",
            "hello",
            "-a",
            "test-agent",
            "-g",
            "3",
            "http://example.com/submit",
        ]);
        let request = opt.to_request().expect("request should build");
        assert_eq!(request.method().as_ref(), "POST");
        assert_eq!(request.body(), b"hello");
        assert_eq!(request.headers().get("user-agent"), Some("test-agent"));
        assert_eq!(request.redirect_budget(), 3);
    }
}
