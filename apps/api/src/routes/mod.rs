pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::letter::handlers as letters;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document ingestion
        .route(
            "/api/v1/resumes/extract-text",
            post(documents::handle_extract_text),
        )
        // Structured extraction
        .route("/api/v1/extract/job", post(letters::handle_extract_job))
        .route("/api/v1/extract/person", post(letters::handle_extract_person))
        // Cover letters
        .route(
            "/api/v1/cover-letters",
            post(letters::handle_create_cover_letter),
        )
        .route(
            "/api/v1/cover-letters/from-pdf",
            post(letters::handle_create_cover_letter_from_pdf),
        )
        .route(
            "/api/v1/cover-letters/render",
            post(documents::handle_render),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::ScriptedBackend;

    #[tokio::test]
    async fn test_health_reports_ok() {
        let config = Config::from_lookup(|key| {
            (key == "MISTRAL_API_KEY").then(|| "test-key".to_string())
        })
        .unwrap();
        let state = AppState::new(Arc::new(ScriptedBackend::new(vec![])), &config);

        let response = build_router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "coverletter-api");
    }
}
