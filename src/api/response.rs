//! Response types for the Podium Engine API.
//!
//! This module defines the success bodies of both endpoints and the error
//! response structures used when a request cannot be served.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Diagnostic;
use crate::engine::SourceFailure;
use crate::error::EngineError;
use crate::models::{Award, TournamentAwards};

/// Response body of `POST /palmares`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PalmaresResponse {
    /// Identifier of this run, also present in the server logs.
    pub run_id: Uuid,
    /// When the run completed.
    pub generated_at: DateTime<Utc>,
    /// Awards per processed source, in source order.
    pub tournaments: Vec<TournamentAwards>,
    /// Sources that were skipped.
    pub failures: Vec<SourceFailure>,
    /// Configuration diagnostics.
    pub diagnostics: Vec<Diagnostic>,
    /// The text palmarès.
    pub text: String,
}

/// Response body of `POST /assign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignResponse {
    /// Awards in rule order.
    pub awards: Vec<Award>,
    /// Configuration diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::NoSources => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "NO_SOURCES",
                    message,
                    "The URLS line is missing or lists no trusted results page",
                ),
            ),
            EngineError::InvalidRankSpec { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_RANK_SPEC", message),
            ),
            EngineError::ExtractionFailed { .. } => Self::new(
                StatusCode::BAD_GATEWAY,
                ApiError::new("EXTRACTION_FAILED", message),
            ),
            EngineError::AllSourcesFailed { .. } => Self::new(
                StatusCode::BAD_GATEWAY,
                ApiError::with_details(
                    "ALL_SOURCES_FAILED",
                    message,
                    "None of the results pages could be fetched or read",
                ),
            ),
            EngineError::RenderError { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("RENDER_ERROR", message),
            ),
        }
    }
}
