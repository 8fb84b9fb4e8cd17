//! Response types for the attendance engine API.
//!
//! This module defines the success and error response structures for
//! the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{PeriodSummary, WorkEntryLine};

/// Response body for a successful `/reconcile` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResponse {
    /// The computed period summary.
    pub summary: PeriodSummary,
    /// Coded worked-day lines for the downstream payroll rule engine,
    /// with manual overrides already merged.
    pub lines: Vec<WorkEntryLine>,
}

impl From<PeriodSummary> for ReconcileResponse {
    fn from(summary: PeriodSummary) -> Self {
        let lines = summary.worked_day_lines();
        Self { summary, lines }
    }
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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
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

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::PolicyNotFound { profile } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "POLICY_NOT_FOUND",
                    format!("Policy profile not found: {}", profile),
                    format!("The policy profile '{}' is not configured", profile),
                ),
            },
            EngineError::MissingCalendar { employee_id, date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MISSING_CALENDAR",
                    format!("No calendar day for employee '{}' on {}", employee_id, date),
                    "Every date in the requested range must be covered by a day spec",
                ),
            },
            EngineError::InvalidDaySpec {
                employee_id,
                date,
                message,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_DAY_SPEC",
                    format!(
                        "Invalid calendar day for employee '{}' on {}: {}",
                        employee_id, date, message
                    ),
                    "The calendar data contains invalid information",
                ),
            },
            EngineError::InvalidPunch {
                employee_id,
                check_in,
                message,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PUNCH",
                    format!(
                        "Invalid punch for employee '{}' checked in at {}: {}",
                        employee_id, check_in, message
                    ),
                    "The attendance data contains invalid information",
                ),
            },
            EngineError::DuplicateRun {
                employee_id,
                date_from,
                date_to,
            } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "DUPLICATE_RUN",
                    format!(
                        "A validated summary already exists for employee '{}' overlapping {}..{}",
                        employee_id, date_from, date_to
                    ),
                    "Validated summaries are never silently regenerated",
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
