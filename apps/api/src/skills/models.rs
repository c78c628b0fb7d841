//! Request and value types shared across the skill suggestion pipeline.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const DEFAULT_LOCALE: &str = "ar";
/// Entries longer than this (in characters) are dropped by the sanitizer.
pub const MAX_SKILL_LEN: usize = 40;

/// Body of `POST /api/suggest-skills`.
///
/// `title` is optional at the serde level so a missing field becomes a 400
/// from the handler instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillRequest {
    #[serde(default, deserialize_with = "text_or_number")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub years: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub stack: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub locale: Option<String>,
}

impl SkillRequest {
    #[cfg(test)]
    pub fn with_title(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// The trimmed title, or `None` when missing or blank.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    pub fn locale(&self) -> &str {
        self.locale
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LOCALE)
    }
}

/// Accepts a JSON string or number; anything else (including null) becomes `None`.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Output shape the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `["A", "B"]`
    Array,
    /// `{"skills": ["A", "B"]}`
    Object,
}

impl ResponseShape {
    pub fn default_max_items(self) -> usize {
        match self {
            ResponseShape::Array => 12,
            ResponseShape::Object => 20,
        }
    }

    /// Lower bound requested from the model. Both shapes ask for at least 8.
    pub fn min_items(self) -> usize {
        8
    }
}

impl FromStr for ResponseShape {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "array" => Ok(ResponseShape::Array),
            "object" | "object-with-skills-field" => Ok(ResponseShape::Object),
            other => anyhow::bail!("SKILLS_RESPONSE_SHAPE must be 'array' or 'object', got '{other}'"),
        }
    }
}

/// Limits applied by the sanitizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeOptions {
    pub max_items: usize,
    pub max_len: usize,
}

impl SanitizeOptions {
    pub fn new(max_items: usize) -> Self {
        Self {
            max_items,
            max_len: MAX_SKILL_LEN,
        }
    }
}

/// One raw item from the model's list, before coercion to a plain string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillCandidate {
    Text(String),
    Named {
        name: Option<String>,
        skill: Option<String>,
    },
    Other,
}

impl SkillCandidate {
    /// Display string for the candidate; empty when no usable text exists.
    pub fn as_text(&self) -> &str {
        match self {
            SkillCandidate::Text(s) => s,
            SkillCandidate::Named { name, skill } => name
                .as_deref()
                .filter(|s| !s.is_empty())
                .or(skill.as_deref())
                .unwrap_or(""),
            SkillCandidate::Other => "",
        }
    }
}

impl From<Value> for SkillCandidate {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => SkillCandidate::Text(s),
            Value::Object(mut map) => {
                let mut take = |key: &str| match map.remove(key) {
                    Some(Value::String(s)) => Some(s),
                    _ => None,
                };
                SkillCandidate::Named {
                    name: take("name"),
                    skill: take("skill"),
                }
            }
            _ => SkillCandidate::Other,
        }
    }
}

impl From<&str> for SkillCandidate {
    fn from(s: &str) -> Self {
        SkillCandidate::Text(s.to_string())
    }
}
