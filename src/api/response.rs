//! Response types for the reporting API.
//!
//! This module defines the success payload, the structured error payload,
//! and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Success payload for the `/api/procesar` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// Relative URL of the generated report artifact.
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    /// Summary statistics for the batch.
    pub stats: ProcessStats,
}

/// Batch summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessStats {
    /// How many mailboxes were requested.
    #[serde(rename = "totalCorreos")]
    pub total_emails: usize,
    /// How many mailboxes aggregated without error.
    #[serde(rename = "procesadosExitosamente")]
    pub processed_successfully: u32,
    /// Business days in the requested range.
    #[serde(rename = "diasHabiles")]
    pub business_days: u32,
    /// First day of the range, `YYYY-MM-DD`.
    #[serde(rename = "fechaInicio")]
    pub start_date: String,
    /// Last day of the range, `YYYY-MM-DD`.
    #[serde(rename = "fechaFin")]
    pub end_date: String,
}

/// Error payload returned for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable error headline.
    pub error: String,
    /// Human-readable cause.
    pub message: String,
    /// When the failure was produced.
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    /// Creates a new error payload stamped with the current time.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// API error with its HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = match &error {
            EngineError::Validation { .. } => StatusCode::BAD_REQUEST,
            EngineError::Auth { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        ApiErrorResponse {
            status,
            error: ApiError::new("Error al procesar la solicitud", error.to_string()),
        }
    }
}
