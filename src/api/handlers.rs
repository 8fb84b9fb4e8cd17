//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{AdjustmentLine, DaySpec, ManualLine, Policy, Punch};
use crate::reconcile::compute_period;

use super::request::ReconcileRequest;
use super::response::{ApiError, ApiErrorResponse, ReconcileResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/reconcile", post(reconcile_handler))
        .with_state(state)
}

/// Handler for POST /reconcile endpoint.
///
/// Accepts a reconciliation request and returns the computed period
/// summary with its coded worked-day lines.
async fn reconcile_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReconcileRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reconciliation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    if request.date_to < request.date_from {
        return (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "application/json")],
            Json(ApiError::validation_error("date_to must not precede date_from")),
        )
            .into_response();
    }

    // Resolve the governing policy: inline > named profile > default
    let policy = match resolve_policy(&request, &state) {
        Ok(policy) => policy,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Policy resolution failed"
            );
            let api_error: ApiErrorResponse = err.into();
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    };

    // Convert request types to domain types
    let days: Vec<DaySpec> = request.days.into_iter().map(Into::into).collect();
    let punches: Vec<Punch> = request.punches.into_iter().map(Into::into).collect();
    let adjustments: Vec<AdjustmentLine> =
        request.adjustments.into_iter().map(Into::into).collect();
    let manual_lines: Vec<ManualLine> =
        request.manual_lines.into_iter().map(Into::into).collect();

    // Perform the reconciliation
    let start_time = Instant::now();
    match compute_period(
        &request.employee_id,
        request.date_from,
        request.date_to,
        &policy,
        &days,
        &punches,
        &adjustments,
        manual_lines,
    ) {
        Ok(summary) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                employee_id = %summary.employee_id,
                worked_days = summary.worked_days,
                absent_days = summary.absent_days,
                warnings_count = summary.warnings.len(),
                duration_us = duration.as_micros(),
                "Reconciliation completed successfully"
            );
            let response: ReconcileResponse = summary.into();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Reconciliation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Resolves the policy governing a request.
fn resolve_policy(
    request: &ReconcileRequest,
    state: &AppState,
) -> Result<Policy, crate::error::EngineError> {
    if let Some(policy) = &request.policy {
        return Ok(policy.clone());
    }
    let config = state.config();
    match &request.policy_profile {
        Some(name) => config.profile(name).cloned(),
        None => config.default_profile().cloned(),
    }
}
