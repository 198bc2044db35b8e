//! Pulling a JSON object out of free-form completion text.

use serde_json::{Map, Value};

use crate::error::ParseError;

/// Parses the span from the first `{` to the last `}` as a JSON object.
///
/// Surrounding prose and markdown fences are ignored. Greedy on purpose:
/// the outermost object wins, nested braces included.
///
/// # Errors
///
/// Returns [`ParseError::NoJsonObject`] when there is no such span, and
/// [`ParseError::InvalidJson`] when the span does not parse.
pub fn parse_first_json_object(text: &str) -> Result<Map<String, Value>, ParseError> {
    let start = text.find('{').ok_or(ParseError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(ParseError::NoJsonObject)?;
    if end < start {
        return Err(ParseError::NoJsonObject);
    }
    Ok(serde_json::from_str(&text[start..=end])?)
}

/// Leading slice of `text` for log lines, cut on a char boundary.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
