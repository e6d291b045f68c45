//! Minimal Object Parser
//!
//! Share documents use a small subset of JSON:
//!
//! ```text
//! object := '{' [ pair ( ',' pair )* [','] ] '}'
//! pair   := '"' key '"' ':' value
//! value  := object | '"' chars '"' | integer
//! ```
//!
//! Whitespace is insignificant everywhere (it is stripped before parsing, so
//! string values never contain any). There are no escapes, arrays, floats,
//! booleans or null; such input is rejected rather than half-understood.
//!
//! The parser is a recursive descent over the stripped text with a single
//! byte cursor threaded through the calls. Error positions are offsets into
//! that stripped text. Objects nest at most [`MAX_DEPTH`] levels deep.

use crate::error::{RecoveryError, Result};
use std::collections::BTreeMap;

/// Deepest object nesting accepted, the top-level object counting as 1.
pub const MAX_DEPTH: usize = 128;

/// A parsed object: key → value. Duplicate keys keep the last value.
pub type Object = BTreeMap<String, Value>;

/// A parsed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Integer(i64),
    Object(Object),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

/// Parse a whole document into its top-level object.
///
/// # Errors
/// `MalformedInput` for any structural violation, `InvalidNumber` for a
/// numeric-looking literal that is not a valid `i64`.
pub fn parse(text: &str) -> Result<Object> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    if !compact.starts_with('{') || !compact.ends_with('}') {
        return Err(RecoveryError::malformed(
            0,
            "document must be a single object enclosed in braces",
        ));
    }

    let mut pos = 0;
    let object = parse_object(&compact, &mut pos, 1)?;

    if pos != compact.len() {
        return Err(RecoveryError::malformed(
            pos,
            "unexpected characters after the closing brace",
        ));
    }

    Ok(object)
}

// Expects `src[*pos] == '{'`; leaves the cursor just past the matching '}'.
fn parse_object(src: &str, pos: &mut usize, depth: usize) -> Result<Object> {
    if depth > MAX_DEPTH {
        return Err(RecoveryError::malformed(*pos, "nesting too deep"));
    }

    let bytes = src.as_bytes();
    let open = *pos;
    *pos += 1;

    let mut object = Object::new();
    loop {
        match bytes.get(*pos) {
            None => return Err(RecoveryError::malformed(open, "unterminated object")),
            Some(b'}') => {
                *pos += 1;
                return Ok(object);
            }
            Some(b'"') => {}
            Some(_) => return Err(RecoveryError::malformed(*pos, "expected a quoted key")),
        }

        let key = parse_string(src, pos, "key")?;

        if bytes.get(*pos) != Some(&b':') {
            return Err(RecoveryError::malformed(
                *pos,
                format!("expected ':' after key \"{}\"", key),
            ));
        }
        *pos += 1;

        let value = parse_value(src, pos, depth)?;
        object.insert(key, value);

        if bytes.get(*pos) == Some(&b',') {
            *pos += 1;
        }
    }
}

// Expects `src[*pos] == '"'`; returns the text up to the next quote.
fn parse_string(src: &str, pos: &mut usize, what: &str) -> Result<String> {
    let start = *pos + 1;
    let end = src[start..]
        .find('"')
        .map(|offset| start + offset)
        .ok_or_else(|| RecoveryError::malformed(*pos, format!("unterminated {}", what)))?;

    *pos = end + 1;
    Ok(src[start..end].to_string())
}

fn parse_value(src: &str, pos: &mut usize, depth: usize) -> Result<Value> {
    match src.as_bytes().get(*pos) {
        Some(b'{') => parse_object(src, pos, depth + 1).map(Value::Object),
        Some(b'"') => parse_string(src, pos, "string value").map(Value::String),
        _ => parse_integer(src, pos).map(Value::Integer),
    }
}

// An integer literal runs up to the next ',' or '}' (or the end of input).
fn parse_integer(src: &str, pos: &mut usize) -> Result<i64> {
    let start = *pos;
    let len = src[start..]
        .find([',', '}'])
        .unwrap_or(src.len() - start);
    let literal = &src[start..start + len];

    match literal.bytes().next() {
        None => return Err(RecoveryError::malformed(start, "expected a value")),
        Some(b'0'..=b'9' | b'+' | b'-') => {}
        Some(_) => {
            return Err(RecoveryError::malformed(
                start,
                format!("unsupported value '{}'", literal),
            ))
        }
    }

    let value = literal
        .parse::<i64>()
        .map_err(|_| RecoveryError::InvalidNumber {
            literal: literal.to_string(),
        })?;

    *pos = start + len;
    Ok(value)
}
