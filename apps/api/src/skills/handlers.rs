//! Axum route handlers for the skill suggestion API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::AppError;
use crate::skills::models::SkillRequest;
use crate::state::AppState;

/// POST /api/suggest-skills
///
/// Returns a JSON array of hard-skill names for the given job title.
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    payload: Result<Json<SkillRequest>, JsonRejection>,
) -> Result<Json<Vec<String>>, AppError> {
    let Json(request) =
        payload.map_err(|e| AppError::Validation(format!("invalid request body: {}", e.body_text())))?;

    let skills = state.suggester.suggest(&request).await?;

    Ok(Json(skills))
}
