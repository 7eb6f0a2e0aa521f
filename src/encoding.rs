//! Single-byte (ISO-8859-1) text encoding for the head section of messages.
//!
//! Each byte maps to the code point of the same value, so any byte sequence
//! decodes and re-encodes to itself. Head bytes are never interpreted as UTF-8.

use log::warn;

/// Decodes bytes one code point per byte.
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Number of characters in `text` above U+00FF.
pub fn unencodable_count(text: &str) -> usize {
    text.chars().filter(|&c| u32::from(c) > 0xFF).count()
}

/// Encodes text one byte per code point.
///
/// Code points above U+00FF have no single-byte form and are written as `?`,
/// with a warning naming how many were replaced.
pub fn encode(text: &str) -> Vec<u8> {
    let replaced = unencodable_count(text);
    if replaced > 0 {
        warn!("{replaced} character(s) outside ISO-8859-1 written as '?' in message head");
    }
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
