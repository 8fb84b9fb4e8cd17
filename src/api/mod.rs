//! HTTP API module for the attendance engine.
//!
//! This module provides the REST API endpoint for reconciling raw
//! attendance punches against an employee's calendar.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ReconcileRequest;
pub use response::{ApiError, ReconcileResponse};
pub use state::AppState;
