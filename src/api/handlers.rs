//! HTTP request handlers for the timecard API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{PayrollExportRow, TimecardReport};

use super::request::TimecardRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/timecard/compute", post(compute_handler))
        .route("/timecard/export", post(export_handler))
        .with_state(state)
}

/// Handler for POST /timecard/compute.
///
/// Returns the month's [`TimecardReport`].
async fn compute_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimecardRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing timecard compute request");

    match process(&state, payload, correlation_id) {
        Ok(report) => json_response(StatusCode::OK, &report),
        Err(response) => response,
    }
}

/// Handler for POST /timecard/export.
///
/// Returns the month flattened into [`PayrollExportRow`]s.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimecardRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing timecard export request");

    match process(&state, payload, correlation_id) {
        Ok(report) => {
            let rows = PayrollExportRow::rows_for(&report);
            info!(
                correlation_id = %correlation_id,
                rows = rows.len(),
                "Export rows built"
            );
            json_response(StatusCode::OK, &rows)
        }
        Err(response) => response,
    }
}

/// Parses, validates, and computes a request.
fn process(
    state: &AppState,
    payload: Result<Json<TimecardRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<TimecardReport, Response> {
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(rejection, correlation_id);
            return Err(json_response(StatusCode::BAD_REQUEST, &error));
        }
    };

    let start_time = Instant::now();
    let result = request.to_timesheet().and_then(|timesheet| {
        state
            .engine()
            .compute_month(&request.worker_id, request.year, request.month, &timesheet)
    });

    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                worker_id = %request.worker_id,
                days_worked = report.totals.days_worked,
                pending_days = report.pending_days.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Timecard computed successfully"
            );
            Ok(report)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                worker_id = %request.worker_id,
                error = %err,
                "Timecard computation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            Err(json_response(api_error.status, &api_error.error))
        }
    }
}

fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
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
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
