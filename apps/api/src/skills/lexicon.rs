//! Soft-skill lexicon. Any candidate whose lowercase form contains one of
//! these substrings is treated as a soft skill and dropped.
//!
//! Matching is deliberately coarse: "Project Management" is dropped because
//! it contains "management".

pub const SOFT_SKILLS: &[&str] = &[
    "communication",
    "problem",
    "teamwork",
    "leadership",
    "collaboration",
    "time management",
    "critical thinking",
    "creativity",
    "adaptability",
    "fast learner",
    "self-motivated",
    "attention to detail",
    "work ethic",
    "analytical",
    "multitasking",
    "proactive",
    "strategic",
    "presentation",
    "negotiation",
    "interpersonal",
    "flexibility",
    "initiative",
    "motivation",
    "organization",
    "planning",
    "mentoring",
    "management",
    "research",
    "sales",
    "marketing",
    "customer service",
    "writing",
    "verbal",
    "listening",
    "conflict",
    "decision",
    "cooperation",
    "dependability",
    "empathy",
];

/// Case-insensitive substring match against `SOFT_SKILLS`.
pub fn is_soft_skill(skill: &str) -> bool {
    let lower = skill.to_lowercase();
    SOFT_SKILLS.iter().any(|soft| lower.contains(soft))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_entries_are_lowercase() {
        assert!(SOFT_SKILLS.iter().all(|s| *s == s.to_lowercase()));
    }

    #[test]
    fn test_matches_case_insensitively() {
        assert!(is_soft_skill("Communication"));
        assert!(is_soft_skill("TEAMWORK"));
        assert!(is_soft_skill("Problem Solving"));
    }

    #[test]
    fn test_substring_match_is_coarse() {
        assert!(is_soft_skill("Project Management"));
        assert!(is_soft_skill("UX Research"));
    }

    #[test]
    fn test_hard_skills_pass() {
        for skill in ["Rust", "PostgreSQL", "AutoCAD", "Kubernetes", "Power BI"] {
            assert!(!is_soft_skill(skill), "{skill} flagged as soft");
        }
    }
}
