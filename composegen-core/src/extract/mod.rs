//! Tolerant extraction of code and JSON payloads from model output
//!
//! Backend responses arrive as free-form text that may or may not wrap the
//! interesting part in a markdown fence, and JSON payloads are frequently
//! malformed (raw newlines inside string values, stray prose around the
//! object). Everything here is layered so that a later, cruder strategy
//! catches what an earlier, stricter one rejects; the only error that ever
//! escapes is a missing field anchor.

use serde_json::Value;
use thiserror::Error;

/// Extraction failure: the last-resort field scan found nothing to anchor on
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("field '{field}' not found in response")]
    FieldNotFound { field: String },
}

/// Language tags that mark a fenced block as code
const CODE_FENCE_TAGS: &[&str] = &["kotlin", "java", "kt"];

/// Bare language names dropped when they appear alone on the first line of
/// an untagged fenced block
const BARE_LANGUAGE_NAMES: &[&str] = &["kotlin", "java", "kt", "json"];

/// Pull source code out of a response, stripping markdown fences.
///
/// Prefers a block tagged with a known code language, then any fenced
/// block, then the payload unchanged.
pub fn extract_code(payload: &str) -> String {
    for tag in CODE_FENCE_TAGS {
        if let Some(block) = tagged_block(payload, tag) {
            return block.trim().to_string();
        }
    }
    if let Some(block) = first_fenced_block(payload) {
        return strip_bare_language_line(&block).trim().to_string();
    }
    payload.trim().to_string()
}

/// Pull the JSON text out of a response, stripping markdown fences.
pub fn extract_json_text(payload: &str) -> String {
    if let Some(block) = tagged_block(payload, "json") {
        return block.trim().to_string();
    }
    if let Some(block) = first_fenced_block(payload) {
        return strip_bare_language_line(&block).trim().to_string();
    }
    payload.trim().to_string()
}

/// Parse JSON text, tolerating raw control characters inside string values.
///
/// Tries a strict parse first; on failure, escapes raw control characters
/// that appear inside string literals and retries. Returns `None` when both
/// attempts fail.
pub fn parse_json_lenient(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }
    serde_json::from_str(&escape_control_chars(text)).ok()
}

/// Recover a single string field from malformed JSON by scanning.
///
/// Locates `"field"`, skips to the colon, then copies from the first quote
/// until an unescaped closing quote (or end of input), unescaping `\n` and
/// `\"` sequences. Fails only when the field name is absent.
pub fn scan_string_field(payload: &str, field: &str) -> Result<String, ExtractionError> {
    let anchor = format!("\"{}\"", field);
    let start = payload
        .find(&anchor)
        .ok_or_else(|| ExtractionError::FieldNotFound { field: field.to_string() })?;

    let after_anchor = &payload[start + anchor.len()..];
    let after_colon = match after_anchor.find(':') {
        Some(idx) => &after_anchor[idx + 1..],
        None => return Err(ExtractionError::FieldNotFound { field: field.to_string() }),
    };
    let value_start = match after_colon.find('"') {
        Some(idx) => &after_colon[idx + 1..],
        None => return Err(ExtractionError::FieldNotFound { field: field.to_string() }),
    };

    let mut result = String::new();
    let mut chars = value_start.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('"') => result.push('"'),
                Some('\\') => result.push('\\'),
                Some('t') => result.push('\t'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => break,
            }
        } else if c == '"' {
            break;
        } else {
            result.push(c);
        }
    }
    Ok(result)
}

/// Return the interior of the first block fenced as ```<tag> ... ```
fn tagged_block(payload: &str, tag: &str) -> Option<String> {
    let opener = format!("```{}", tag);
    let start = payload.find(&opener)?;
    let rest = &payload[start + opener.len()..];
    let end = rest.find("```").unwrap_or(rest.len());
    Some(rest[..end].to_string())
}

/// Return the interior of the first generically fenced block, if any
fn first_fenced_block(payload: &str) -> Option<String> {
    let parts: Vec<&str> = payload.split("```").collect();
    if parts.len() >= 3 { Some(parts[1].to_string()) } else { None }
}

/// Drop a first line that is exactly a bare language name
fn strip_bare_language_line(block: &str) -> String {
    let trimmed = block.trim();
    if let Some((first, rest)) = trimmed.split_once('\n') {
        if BARE_LANGUAGE_NAMES.contains(&first.trim()) {
            return rest.to_string();
        }
    }
    trimmed.to_string()
}

/// Escape raw control characters that occur inside JSON string literals
fn escape_control_chars(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if escaped {
            result.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => {
                result.push(c);
                escaped = true;
            }
            '"' => {
                result.push(c);
                in_string = !in_string;
            }
            '\n' if in_string => result.push_str("\\n"),
            '\r' if in_string => result.push_str("\\r"),
            '\t' if in_string => result.push_str("\\t"),
            c if in_string && (c as u32) < 0x20 => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => result.push(c),
        }
    }
    result
}
