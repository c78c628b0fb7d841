//! Response Parser — turns raw model text into skill candidates.
//!
//! Strategies are tried in order until one yields JSON:
//! 1. `Direct`: the fence-stripped text is valid JSON.
//! 2. `Fragment`: the first bracket-matched `[...]` or `{...}` span inside
//!    the text is valid JSON. The delimiter of the expected shape is tried first.
//!
//! The parsed value must then be either a bare array or an object with an
//! array `skills` field.

use serde_json::Value;
use thiserror::Error;

use crate::skills::models::{ResponseShape, SkillCandidate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no JSON value found in model output")]
    NoJson,

    #[error("JSON is neither an array nor an object with a 'skills' array")]
    InvalidFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    Direct,
    /// Only the span starting at the first `open` is considered; later
    /// candidates are not searched if that one fails to parse.
    Fragment { open: char, close: char },
}

impl ParseStrategy {
    /// Strategies in priority order for the given expected shape.
    pub fn ordered_for(expected: ResponseShape) -> [ParseStrategy; 3] {
        let array = ParseStrategy::Fragment {
            open: '[',
            close: ']',
        };
        let object = ParseStrategy::Fragment {
            open: '{',
            close: '}',
        };
        match expected {
            ResponseShape::Array => [ParseStrategy::Direct, array, object],
            ResponseShape::Object => [ParseStrategy::Direct, object, array],
        }
    }

    pub fn apply(self, text: &str) -> Option<Value> {
        match self {
            ParseStrategy::Direct => serde_json::from_str(text.trim()).ok(),
            ParseStrategy::Fragment { open, close } => {
                let fragment = find_balanced(text, open, close)?;
                serde_json::from_str(fragment).ok()
            }
        }
    }
}

/// Parses raw model output into candidates.
pub fn parse_skills(
    raw: &str,
    expected: ResponseShape,
) -> Result<Vec<SkillCandidate>, ParseError> {
    let cleaned = strip_code_fences(raw);

    let value = ParseStrategy::ordered_for(expected)
        .into_iter()
        .find_map(|strategy| strategy.apply(&cleaned))
        .ok_or(ParseError::NoJson)?;

    extract_candidates(value)
}

/// Removes every ```json and ``` marker, wherever it appears.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "")
}

/// Accepts a top-level array first, then an object's `skills` array.
fn extract_candidates(value: Value) -> Result<Vec<SkillCandidate>, ParseError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("skills") {
            Some(Value::Array(items)) => items,
            _ => return Err(ParseError::InvalidFormat),
        },
        _ => return Err(ParseError::InvalidFormat),
    };

    Ok(items.into_iter().map(SkillCandidate::from).collect())
}

/// Finds the span from the first `open` to its matching `close`, skipping
/// delimiters that appear inside JSON string literals.
fn find_balanced(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            c if c == open => depth += 1,
            c if c == close => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + close.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}
