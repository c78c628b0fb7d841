pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::skills::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/api/health", get(health::health_handler))
        .route(
            "/api/suggest-skills",
            post(handlers::handle_suggest_skills),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::skills::service::tests::{FakeGenerator, Reply};
    use crate::skills::service::{SkillBackend, SkillSuggester};

    fn state_with(backend: SkillBackend, pairs: &[(&str, &str)]) -> AppState {
        let config = Config::from_lookup(|key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
        .unwrap();
        let suggester = SkillSuggester::new(
            backend,
            config.response_shape,
            config.max_items,
            config.llm_timeout,
        );
        AppState { config, suggester }
    }

    fn mock_app() -> Router {
        build_router(state_with(SkillBackend::Mock, &[("MOCK_AI", "true")]))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn suggest(body: Value) -> Request<Body> {
        Request::post("/api/suggest-skills")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        for path in ["/", "/api/health"] {
            let (status, body) =
                send(mock_app(), Request::get(path).body(Body::empty()).unwrap()).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["ok"], true);
            assert_eq!(body["hasApiKey"], false);
            assert_eq!(body["mockAI"], true);
            assert_eq!(body["model"], "gemini-1.5-flash");
            assert_eq!(body["port"], 3000);
        }
    }

    #[tokio::test]
    async fn test_mock_frontend_scenario() {
        let (status, body) = send(mock_app(), suggest(json!({"title": "Frontend Developer"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!(["JavaScript", "React", "TypeScript", "HTML5", "CSS3", "REST APIs", "Git", "Jest"])
        );
    }

    #[tokio::test]
    async fn test_empty_title_is_400_without_ai_call() {
        let generator = FakeGenerator::new(Reply::Text("[\"Rust\"]"));
        let app = build_router(state_with(
            SkillBackend::Live(generator.clone()),
            &[("GEMINI_API_KEY", "k")],
        ));

        let (status, body) = send(app, suggest(json!({"title": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_title_and_bad_json_are_400() {
        let (status, _) = send(mock_app(), suggest(json!({"years": "3"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let request = Request::post("/api/suggest-skills")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(mock_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_live_not_json_is_502() {
        let generator = FakeGenerator::new(Reply::Text("not json at all"));
        let app = build_router(state_with(
            SkillBackend::Live(generator),
            &[("GEMINI_API_KEY", "k")],
        ));

        let (status, body) = send(app, suggest(json!({"title": "Welder"}))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "MALFORMED_RESPONSE");
    }

    #[tokio::test]
    async fn test_live_empty_reply_is_502() {
        let generator = FakeGenerator::new(Reply::Empty);
        let app = build_router(state_with(
            SkillBackend::Live(generator),
            &[("GEMINI_API_KEY", "k")],
        ));

        let (status, body) = send(app, suggest(json!({"title": "Chef"}))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "MALFORMED_RESPONSE");
    }

    #[tokio::test]
    async fn test_live_success_returns_array_with_configured_bound() {
        let generator = FakeGenerator::new(Reply::Text(
            r#"["Revit","AutoCAD","SketchUp","Lumion","Rhino","Teamwork"]"#,
        ));
        let app = build_router(state_with(
            SkillBackend::Live(generator),
            &[
                ("GEMINI_API_KEY", "k"),
                ("SKILLS_RESPONSE_SHAPE", "array"),
                ("SKILLS_MAX_ITEMS", "4"),
            ],
        ));

        let (status, body) = send(app, suggest(json!({"title": "Architect", "locale": "en"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["Revit", "AutoCAD", "SketchUp", "Lumion"]));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500() {
        let generator: Arc<FakeGenerator> = FakeGenerator::new(Reply::ApiError(403));
        let app = build_router(state_with(
            SkillBackend::Live(generator),
            &[("GEMINI_API_KEY", "k")],
        ));

        let (status, body) = send(app, suggest(json!({"title": "Baker"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, body) =
            send(mock_app(), Request::get("/nope").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
