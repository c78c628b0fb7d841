use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::skills::parser::ParseError;

pub const EMPTY_RESULT_HINT: &str = "Try a more specific job title or send a clear stack";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(#[from] ParseError),

    #[error("No suitable hard skills extracted")]
    EmptyResult,

    #[error("Upstream AI failure: {0}")]
    Upstream(#[from] LlmError),

    #[error("AI provider did not answer within {0:?}")]
    Timeout(Duration),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, hint) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::MalformedResponse(e) => {
                tracing::warn!("Model returned unusable output: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_RESPONSE",
                    "The model did not return valid JSON".to_string(),
                    None,
                )
            }
            AppError::EmptyResult => (
                StatusCode::BAD_GATEWAY,
                "EMPTY_RESULT",
                "No suitable hard skills could be extracted".to_string(),
                Some(EMPTY_RESULT_HINT),
            ),
            AppError::Upstream(e) => {
                match e {
                    LlmError::Api { status, message } => {
                        tracing::error!("Gemini API failed: status={status} data={message}");
                    }
                    other => tracing::error!("Gemini API failed: {other}"),
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    "The AI provider request failed".to_string(),
                    None,
                )
            }
            AppError::Timeout(limit) => {
                tracing::error!("Gemini API timed out after {limit:?}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "TIMEOUT",
                    "The AI provider took too long to respond".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(hint) = hint {
            error["hint"] = json!(hint);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let (status, body) = render(AppError::Validation("title is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "title is required");
    }

    #[tokio::test]
    async fn test_empty_result_carries_hint() {
        let (status, body) = render(AppError::EmptyResult).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["hint"], EMPTY_RESULT_HINT);
    }

    #[tokio::test]
    async fn test_upstream_hides_provider_message() {
        let err = AppError::Upstream(LlmError::Api {
            status: 403,
            message: "API key not valid".into(),
        });
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_malformed_and_timeout_statuses() {
        let (status, _) = render(AppError::MalformedResponse(ParseError::NoJson)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, body) = render(AppError::Timeout(Duration::from_secs(30))).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert!(body["error"].get("hint").is_none());
    }
}
