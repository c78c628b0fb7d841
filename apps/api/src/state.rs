use crate::config::Config;
use crate::skills::service::SkillSuggester;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Mock or live suggestion pipeline, chosen once at startup.
    pub suggester: SkillSuggester,
}
