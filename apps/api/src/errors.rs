use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::report::ReportKind;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// `Display` is end-user-safe for every variant except `Provider` and
/// `Internal`, whose detail is only logged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Please enter some text to analyze.")]
    EmptyInput,

    #[error("AI provider error: {0}")]
    Provider(#[from] LlmError),

    /// The model answered, but not with a payload matching the report schema.
    /// `raw` is kept for diagnostics only.
    #[error("{}", .kind.invalid_format_message())]
    InvalidReportFormat {
        kind: ReportKind,
        reason: String,
        raw: String,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Malformed or ill-typed request bodies surface as `Validation` with a fixed
/// message; the serde detail (line, column, field path) is only logged.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        AppError::Validation(INVALID_BODY_MESSAGE.to_string())
    }
}

pub const INVALID_BODY_MESSAGE: &str = "The request could not be read. Each persona needs all eight traits, \
     each with a value and a significance from 0 to 10.";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::EmptyInput => (StatusCode::BAD_REQUEST, "EMPTY_INPUT", self.to_string()),
            AppError::Provider(e) => {
                tracing::error!("AI provider error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    "The AI service could not produce a report right now. Please try again in a moment."
                        .to_string(),
                )
            }
            AppError::InvalidReportFormat { kind, reason, raw } => {
                // Raw payload is already logged in full where the parse failed.
                tracing::error!(
                    "Invalid {kind} report from model: {reason} ({} bytes of raw output)",
                    raw.len()
                );
                (
                    StatusCode::BAD_GATEWAY,
                    "INVALID_REPORT_FORMAT",
                    self.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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
