use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::render::RenderError;
use crate::session::SessionError;

/// Body of the 400 returned when a download is requested before any generation.
pub const NO_RESUME_MESSAGE: &str = "No resume generated yet.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No resume generated yet")]
    NoResumeGenerated,

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Generation timed out after {0}s")]
    GenerationTimeout(u64),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NoResumeGenerated => {
                return (StatusCode::BAD_REQUEST, NO_RESUME_MESSAGE).into_response();
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::GenerationTimeout(secs) => (
                StatusCode::GATEWAY_TIMEOUT,
                "GENERATION_TIMEOUT",
                format!("Resume generation did not finish within {secs} seconds"),
            ),
            AppError::Session(e) => {
                tracing::error!("Session error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SESSION_ERROR",
                    "A session storage error occurred".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "The PDF could not be rendered".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::header::CONTENT_TYPE;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_no_resume_is_plain_text_400() {
        let response = AppError::NoResumeGenerated.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(body_string(response).await, NO_RESUME_MESSAGE);
    }

    #[tokio::test]
    async fn test_timeout_is_504_json() {
        let response = AppError::GenerationTimeout(60).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"]["code"], "GENERATION_TIMEOUT");
    }

    #[tokio::test]
    async fn test_llm_error_hides_details() {
        let response = AppError::Llm("secret upstream detail".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body_string(response).await.contains("secret"));
    }

    #[tokio::test]
    async fn test_render_error_is_500_json() {
        let response = AppError::Render(RenderError::Pdf("bad xref".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"]["code"], "RENDER_ERROR");
        assert!(!body["error"]["message"].as_str().unwrap().contains("xref"));
    }
}
