//! `application/x-www-form-urlencoded` handling.
//!
//! Parsing is strict: a malformed percent escape anywhere in the body fails the
//! whole parse, while value-level decoding for display degrades per entry.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use url::form_urlencoded;

/// Why a form body or value could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("invalid URL escape \"{0}\"")]
    InvalidEscape(String),

    #[error("invalid semicolon separator in query")]
    Semicolon,
}

/// Decode one form component: `+` becomes a space and `%XX` escapes must be
/// complete hexadecimal pairs.
pub fn unescape(component: &str) -> Result<String, FormError> {
    let bytes = component.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            match escape {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => {
                    let end = (i + 3).min(bytes.len());
                    let raw = String::from_utf8_lossy(&bytes[i..end]).into_owned();
                    return Err(FormError::InvalidEscape(raw));
                }
            }
        } else {
            i += 1;
        }
    }

    let spaced: Cow<'_, str> = if component.contains('+') {
        Cow::Owned(component.replace('+', " "))
    } else {
        Cow::Borrowed(component)
    };
    Ok(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}

/// Parse a form body into decoded `(key, value)` pairs, in body order.
pub fn parse(body: &str) -> Result<Vec<(String, String)>, FormError> {
    let mut pairs = Vec::new();
    for segment in body.split('&') {
        if segment.is_empty() {
            continue;
        }
        if segment.contains(';') {
            return Err(FormError::Semicolon);
        }
        let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
        pairs.push((unescape(key)?, unescape(value)?));
    }
    Ok(pairs)
}

/// Canonical encoding: pairs ordered by key (stable for repeated keys).
pub fn encode(pairs: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = pairs.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in sorted {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// One `key=value` line per pair, each value decoded again for display.
///
/// A value that does not decode is shown as-is.
pub fn pretty_lines(pairs: &[(String, String)]) -> Vec<String> {
    pairs
        .iter()
        .map(|(key, value)| match unescape(value) {
            Ok(decoded) => format!("{}={}", key, decoded),
            Err(_) => format!("{}={}", key, value),
        })
        .collect()
}
