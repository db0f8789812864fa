//! Axum route handlers for document ingestion and rendering.

use axum::{
    extract::Multipart,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::documents::pdf::extract_text;
use crate::documents::render::render_letter;
use crate::errors::AppError;

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub text: String,
}

/// POST /api/v1/resumes/extract-text
///
/// Multipart form with a single `file` field holding a PDF.
pub async fn handle_extract_text(
    mut multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read file: {e}")))?;
        let text = extract_text(data).await?;
        return Ok(Json(ExtractTextResponse { text }));
    }

    Err(AppError::Validation(
        "Please upload a PDF file first.".to_string(),
    ))
}

/// POST /api/v1/cover-letters/render
///
/// Returns the letter laid out as a dated document, as a download.
pub async fn handle_render(Json(request): Json<RenderRequest>) -> Result<Response, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let today = chrono::Local::now().date_naive();
    let document = render_letter(&request.text, today);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"cover_letter.txt\"",
            ),
        ],
        document,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    use super::*;

    fn router() -> Router {
        Router::new()
            .route("/render", axum::routing::post(handle_render))
            .route("/extract", axum::routing::post(handle_extract_text))
    }

    fn multipart_body(boundary: &str, name: &str, content: &str) -> String {
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"cv.pdf\"\r\nContent-Type: application/pdf\r\n\r\n{content}\r\n--{boundary}--\r\n"
        )
    }

    async fn post_multipart(body: String) -> StatusCode {
        let boundary = "X-BOUNDARY";
        router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/extract")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_render_returns_attachment() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/render")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"text": "Dear team,\n\nSincerely,\nJane Doe"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"cover_letter.txt\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let document = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(document.starts_with(&format!("{:>46}", "Cover Letter")));
        assert!(document.ends_with("Sincerely,\nJane Doe\n"));
    }

    #[tokio::test]
    async fn test_extract_text_rejects_non_pdf() {
        let status = post_multipart(multipart_body("X-BOUNDARY", "file", "plain text resume")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_extract_text_requires_file_field() {
        let status = post_multipart(multipart_body("X-BOUNDARY", "other", "%PDF-1.4")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
