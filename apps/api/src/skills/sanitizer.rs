//! Skill Sanitizer: coerce → normalize → drop empties → soft-skill filter →
//! length filter → dedupe → truncate. Never fails; an empty result is the
//! caller's problem.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::skills::lexicon::is_soft_skill;
use crate::skills::models::{SanitizeOptions, SkillCandidate};

fn trademark_glyphs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[™®©]").expect("static regex"))
}

fn parenthesized() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\(.*?\)").expect("static regex"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Removes trademark glyphs and parenthesized annotations, collapses
/// whitespace, trims. Idempotent.
pub fn normalize(raw: &str) -> String {
    let without_glyphs = trademark_glyphs().replace_all(raw, "");
    let without_notes = parenthesized().replace_all(&without_glyphs, "");
    whitespace_runs()
        .replace_all(&without_notes, " ")
        .trim()
        .to_string()
}

/// Runs the full pipeline over model candidates.
pub fn sanitize(candidates: &[SkillCandidate], options: &SanitizeOptions) -> Vec<String> {
    let mut seen = HashSet::new();

    candidates
        .iter()
        .map(|c| normalize(c.as_text()))
        .filter(|s| !s.is_empty())
        .filter(|s| !is_soft_skill(s))
        .filter(|s| s.chars().count() <= options.max_len)
        .filter(|s| seen.insert(s.clone()))
        .take(options.max_items)
        .collect()
}

/// Convenience for plain string lists (mock output, tests).
pub fn sanitize_strings<S: AsRef<str>>(items: &[S], options: &SanitizeOptions) -> Vec<String> {
    let candidates: Vec<SkillCandidate> = items.iter().map(|s| s.as_ref().into()).collect();
    sanitize(&candidates, options)
}
