use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::MODEL;
use crate::state::AppState;

/// GET / and GET /api/health
/// Reports whether a Gemini key is configured and whether mock mode is active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "service": "suggest-skills",
        "version": env!("CARGO_PKG_VERSION"),
        "model": MODEL,
        "port": state.config.port,
        "hasApiKey": state.config.has_api_key(),
        "mockAI": state.suggester.is_mock()
    }))
}
