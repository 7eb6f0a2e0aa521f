//! Compiled patterns for response head parsing.

use std::sync::LazyLock;

use regex::Regex;

/// `{protocol} {code} {message}`; the message may be absent.
const STATUS_LINE_PATTERN: &str =
    r"^(?P<protocol>[A-Za-z][A-Za-z0-9-]*/(?P<version>\d+(?:\.\d+)?)) (?P<code>\d{3})(?: (?P<reason>.*))?$";

/// `{Header-Name}: {value}` with surrounding blanks on the value trimmed.
const HEADER_LINE_PATTERN: &str = r"^(?P<name>[^:\s]+):[ \t]*(?P<value>.*?)[ \t]*$";

/// `charset=` parameter of a `Content-Type` value, optionally quoted.
const CHARSET_PATTERN: &str = r#"(?i)charset\s*=\s*"?(?P<charset>[^";\s]+)"?"#;

fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

pub(super) static STATUS_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(STATUS_LINE_PATTERN, "STATUS_LINE_RE"));
pub(super) static HEADER_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(HEADER_LINE_PATTERN, "HEADER_LINE_RE"));
pub(super) static CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(CHARSET_PATTERN, "CHARSET_RE"));
