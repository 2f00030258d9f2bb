//! Parsing helpers for free-text field values.
//!
//! String-typed fields whose union admitted a numeric member, and
//! `json`-typed fields backing complex unions, both accept free text in the
//! rendered form. These helpers turn that text back into typed values.

use serde_json::Value;

/// Try to parse text as a JSON value, falling back to the original string.
///
/// Used for fields flagged `could_be_number`: "3.5" parses to a number,
/// "mesh" stays a string. Empty input stays an empty string.
pub fn try_parse_number(text: &str) -> Value {
    if text.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Parse text as JSON, auto-quoting simple identifiers.
///
/// Empty input is null. Valid JSON parses as-is. Otherwise, text that reads
/// as a bare identifier (at least one letter; only letters, digits,
/// whitespace, dashes, and underscores) is accepted as a string, so users
/// can type `reading` instead of `"reading"`. Anything else surfaces the
/// JSON error: pure punctuation is more likely malformed JSON than an
/// intentional string.
///
/// # Errors
///
/// Returns the underlying `serde_json` error for malformed JSON that does
/// not qualify as a bare identifier.
pub fn parse_json_or_string(text: &str) -> Result<Value, serde_json::Error> {
    if text.is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(_) if is_bare_identifier(text) => Ok(Value::String(text.to_string())),
        Err(err) => Err(err),
    }
}

fn is_bare_identifier(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || c == '-' || c == '_')
}
