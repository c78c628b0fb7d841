use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::skills::models::ResponseShape;

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// What to do at startup when `GEMINI_API_KEY` is absent and mock mode is not forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingKeyPolicy {
    /// Refuse to start.
    Strict,
    /// Start anyway and serve canned suggestions.
    MockFallback,
}

/// How suggestions are produced for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderMode {
    Mock,
    Live { api_key: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub mock_ai: bool,
    pub missing_key_policy: MissingKeyPolicy,
    pub response_shape: ResponseShape,
    pub max_items: usize,
    pub llm_timeout: Duration,
    /// Total Gemini requests per suggestion, the first one included.
    pub llm_max_attempts: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let response_shape = match get("SKILLS_RESPONSE_SHAPE") {
            Some(raw) => raw.parse::<ResponseShape>()?,
            None => ResponseShape::Object,
        };

        let max_items = match get("SKILLS_MAX_ITEMS") {
            Some(raw) => raw
                .parse::<usize>()
                .context("SKILLS_MAX_ITEMS must be a positive integer")?,
            None => response_shape.default_max_items(),
        };
        if max_items == 0 {
            bail!("SKILLS_MAX_ITEMS must be greater than zero");
        }

        let missing_key_policy = match get("MISSING_KEY_POLICY").as_deref() {
            None | Some("mock") => MissingKeyPolicy::MockFallback,
            Some("strict") => MissingKeyPolicy::Strict,
            Some(other) => bail!("MISSING_KEY_POLICY must be 'strict' or 'mock', got '{other}'"),
        };

        let llm_timeout_secs = get("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;

        let llm_max_attempts = get("LLM_MAX_ATTEMPTS")
            .unwrap_or_else(|| "3".to_string())
            .parse::<u32>()
            .context("LLM_MAX_ATTEMPTS must be a whole number")?;
        if llm_max_attempts == 0 {
            bail!("LLM_MAX_ATTEMPTS must be at least 1 (1 disables retries)");
        }

        Ok(Config {
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_api_base: get("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            mock_ai: get("MOCK_AI").is_some_and(|v| v.eq_ignore_ascii_case("true")),
            missing_key_policy,
            response_shape,
            max_items,
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            llm_max_attempts,
            port: get("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    /// Resolves mock vs live mode. Fails only when the key is missing under `Strict`.
    pub fn provider_mode(&self) -> Result<ProviderMode> {
        if self.mock_ai {
            return Ok(ProviderMode::Mock);
        }

        match (&self.gemini_api_key, self.missing_key_policy) {
            (Some(key), _) => Ok(ProviderMode::Live {
                api_key: key.clone(),
            }),
            (None, MissingKeyPolicy::MockFallback) => Ok(ProviderMode::Mock),
            (None, MissingKeyPolicy::Strict) => bail!(
                "Required environment variable 'GEMINI_API_KEY' is not set \
                 (set it, enable MOCK_AI=true, or use MISSING_KEY_POLICY=mock)"
            ),
        }
    }
}
