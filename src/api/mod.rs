//! HTTP API module for the timecard engine.
//!
//! This module provides the REST endpoints that compute a worker's month
//! from an already-resolved timesheet and return either the full report or
//! the payroll export rows.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DayRequest, IntervalRequest, TimecardRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
