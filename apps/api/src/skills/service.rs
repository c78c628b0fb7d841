//! Skill suggestion pipeline.
//!
//! Flow (live): validate → build_prompt → Gemini (bounded wait) → parse_skills →
//!              sanitize → reject empty.
//! Flow (mock): validate → mock_skills → sanitize.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::{LlmError, TextGenerator};
use crate::skills::mock::mock_skills;
use crate::skills::models::{ResponseShape, SanitizeOptions, SkillRequest};
use crate::skills::parser::parse_skills;
use crate::skills::prompts::{build_prompt, SKILLS_SYSTEM};
use crate::skills::sanitizer::{sanitize, sanitize_strings};

/// Where suggestions come from. Fixed at startup.
#[derive(Clone)]
pub enum SkillBackend {
    Mock,
    Live(Arc<dyn TextGenerator>),
}

/// Shared, immutable suggestion service carried in `AppState`.
#[derive(Clone)]
pub struct SkillSuggester {
    backend: SkillBackend,
    shape: ResponseShape,
    options: SanitizeOptions,
    llm_timeout: Duration,
}

impl SkillSuggester {
    pub fn new(
        backend: SkillBackend,
        shape: ResponseShape,
        max_items: usize,
        llm_timeout: Duration,
    ) -> Self {
        Self {
            backend,
            shape,
            options: SanitizeOptions::new(max_items),
            llm_timeout,
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.backend, SkillBackend::Mock)
    }

    pub async fn suggest(&self, request: &SkillRequest) -> Result<Vec<String>, AppError> {
        let title = request
            .title()
            .ok_or_else(|| AppError::Validation("title is required".to_string()))?;

        let generator = match &self.backend {
            SkillBackend::Mock => {
                debug!("Serving mock skills for title=\"{title}\"");
                return Ok(sanitize_strings(&mock_skills(title), &self.options));
            }
            SkillBackend::Live(generator) => generator,
        };

        let prompt = build_prompt(request, self.shape, self.options.max_items);

        let started = Instant::now();
        let raw = tokio::time::timeout(self.llm_timeout, generator.generate(&prompt, SKILLS_SYSTEM))
            .await
            .map_err(|_| AppError::Timeout(self.llm_timeout))?
            .or_else(|e| match e {
                // Blocked or candidate-less replies are bad model output, not a transport failure
                LlmError::EmptyContent => Ok(String::new()),
                other => Err(other),
            })?;
        info!(
            "Gemini responded in {}ms for title=\"{title}\"",
            started.elapsed().as_millis()
        );

        let candidates = parse_skills(&raw, self.shape)?;
        let skills = sanitize(&candidates, &self.options);

        if skills.is_empty() {
            warn!(
                "All {} candidates filtered out for title=\"{title}\"",
                candidates.len()
            );
            return Err(AppError::EmptyResult);
        }

        Ok(skills)
    }
}
