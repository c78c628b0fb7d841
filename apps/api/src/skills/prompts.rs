// Prompt constants for skill suggestion.
// Templates use `{placeholder}` markers that `build_prompt` replaces.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::skills::models::{ResponseShape, SkillRequest};

const NOT_SPECIFIED: &str = "not specified";

/// System instruction sent with every suggestion call.
pub const SKILLS_SYSTEM: &str = "You are a technical recruiter and career coach. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Soft-skill categories the model is told to exclude.
const EXCLUDED_CATEGORIES: &str =
    "Communication, Problem Solving, Teamwork, Leadership, Time Management, \
     Critical Thinking, Creativity, Adaptability, Collaboration";

const DOMAIN_EXAMPLES: &str = r#"   - Frontend: HTML, CSS, JavaScript, React, Vue, Next.js, Redux, Vite, TailwindCSS, Ant Design
   - Backend: Node.js, Express, NestJS, Prisma, PostgreSQL, Redis, Docker, Kubernetes
   - Data/ML: Python, Pandas, NumPy, Scikit-learn, TensorFlow
   - Architecture/Design: Revit, AutoCAD, 3ds Max, SketchUp, Lumion, V-Ray, Enscape, Rhino, Grasshopper, Photoshop, Illustrator, Navisworks, BIM 360"#;

/// Replace: {title}, {years}, {stack}, {locale}, {excluded}, {min}, {max},
///          {examples}, {output_format}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"You are a hiring expert. List HARD SKILLS ONLY for a job title.
- Job title: "{title}"
- Years of experience: "{years}"
- Current stack: "{stack}"
- Locale: {locale}

Follow these rules:
1) Return JSON only, with no text outside the JSON.
2) Every item must be the name of a tool, software product, programming language, framework, library, platform, technology or protocol.
3) Do NOT include soft skills such as: {excluded}. No generic words.
4) Return between {min} and {max} items.
5) Prefer modern tools that are most relevant today. Accepted examples by field:
{examples}

{output_format}"#;

const ARRAY_FORMAT: &str = r#"Return a JSON array ONLY, for example for "Architect":
["AutoCAD", "Revit", "3ds Max", "Lumion", "SketchUp", "Photoshop", "Rhino", "Grasshopper"]"#;

const OBJECT_FORMAT: &str = r#"Return JSON ONLY in exactly this shape:
{
  "skills": ["Item1", "Item2", "..."]
}"#;

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("static regex"))
}

/// Builds the user prompt. `title` must already be validated non-empty.
pub fn build_prompt(request: &SkillRequest, shape: ResponseShape, max_items: usize) -> String {
    let field = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(NOT_SPECIFIED)
            .to_string()
    };
    let output_format = match shape {
        ResponseShape::Array => ARRAY_FORMAT,
        ResponseShape::Object => OBJECT_FORMAT,
    };
    let min_items = shape.min_items().min(max_items);

    // Single pass over the template: substituted values are never rescanned.
    placeholder()
        .replace_all(SKILLS_PROMPT_TEMPLATE, |caps: &Captures| match &caps[1] {
            "title" => request.title().unwrap_or_default().to_string(),
            "years" => field(&request.years),
            "stack" => field(&request.stack),
            "locale" => request.locale().to_string(),
            "excluded" => EXCLUDED_CATEGORIES.to_string(),
            "min" => min_items.to_string(),
            "max" => max_items.to_string(),
            "examples" => DOMAIN_EXAMPLES.to_string(),
            "output_format" => output_format.to_string(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}
