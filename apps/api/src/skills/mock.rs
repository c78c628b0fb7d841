//! Canned suggestions used when no Gemini key is configured or MOCK_AI is set.

const FRONTEND: &[&str] = &[
    "JavaScript",
    "React",
    "TypeScript",
    "HTML5",
    "CSS3",
    "REST APIs",
    "Git",
    "Jest",
];

const BACKEND: &[&str] = &[
    "Node.js",
    "Express",
    "SQL",
    "PostgreSQL",
    "REST APIs",
    "JWT/OAuth",
    "Docker",
    "Testing",
];

const DATA: &[&str] = &[
    "SQL",
    "Python",
    "Pandas",
    "NumPy",
    "ETL",
    "Data Visualization",
    "Power BI",
    "Statistics",
];

/// Used when no keyword matches. Generic tools rather than soft skills.
const GENERIC: &[&str] = &["Git", "Microsoft Excel", "SQL", "Linux", "Docker", "Jira"];

/// First keyword match wins, in this order.
const KEYWORD_LISTS: &[(&str, &[&str])] = &[
    ("frontend", FRONTEND),
    ("backend", BACKEND),
    ("data", DATA),
];

pub fn mock_skills(title: &str) -> Vec<String> {
    let title = title.to_lowercase();

    KEYWORD_LISTS
        .iter()
        .find(|(keyword, _)| title.contains(keyword))
        .map(|(_, list)| *list)
        .unwrap_or(GENERIC)
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::lexicon::is_soft_skill;

    #[test]
    fn test_frontend_list() {
        assert_eq!(
            mock_skills("Frontend Developer"),
            vec!["JavaScript", "React", "TypeScript", "HTML5", "CSS3", "REST APIs", "Git", "Jest"]
        );
    }

    #[test]
    fn test_keyword_priority() {
        assert_eq!(mock_skills("Frontend Data Engineer")[0], "JavaScript");
        assert_eq!(mock_skills("Backend Data Engineer")[0], "Node.js");
        assert_eq!(mock_skills("DATA Analyst")[0], "SQL");
        assert_eq!(mock_skills("DATA Analyst")[1], "Python");
    }

    #[test]
    fn test_default_list_has_no_soft_skills() {
        let skills = mock_skills("Architect");
        assert_eq!(skills, GENERIC.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        assert!(skills.iter().all(|s| !is_soft_skill(s)));
    }

    #[test]
    fn test_no_list_contains_soft_skills() {
        for (_, list) in KEYWORD_LISTS {
            assert!(list.iter().all(|s| !is_soft_skill(s)));
        }
    }
}
