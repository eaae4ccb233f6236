use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recap_core::SummarizeError;
use recap_llm::LlmError;
use recap_store::StoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error(transparent)]
    Summarize(#[from] SummarizeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::UnknownUser(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Summarize(SummarizeError::FeatureDisabled) => (
                StatusCode::BAD_REQUEST,
                "AI features are not enabled on this server.".to_string(),
            ),
            ApiError::Summarize(SummarizeError::Store(e)) | ApiError::Store(e) => {
                store_status_and_message(e)
            }
            ApiError::Summarize(SummarizeError::Llm(e)) => match e {
                LlmError::Configuration(msg) => {
                    tracing::error!("Completion client misconfigured: {}", msg);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Summarization is misconfigured on this server".to_string(),
                    )
                }
                LlmError::Upstream(msg) | LlmError::InvalidResponse(msg) => {
                    tracing::error!("Completion provider failure: {}", msg);
                    (
                        StatusCode::BAD_GATEWAY,
                        "Summarization backend failed".to_string(),
                    )
                }
            },
        }
    }
}

fn store_status_and_message(error: &StoreError) -> (StatusCode, String) {
    match error {
        StoreError::InvalidFilter(msg) => {
            (StatusCode::BAD_REQUEST, format!("Invalid narrow: {}", msg))
        }
        other => {
            tracing::error!("Store error: {}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = Json(json!({
            "error": message
        }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
