//! Error types for the attendance reconciliation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Every reconciliation error carries the employee id (and the date where
//! one applies) so batch failures stay traceable to a single employee.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// The main error type for the attendance reconciliation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policies.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/policies.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No policy profile with the given name exists in the configuration.
    #[error("Policy profile not found: {profile}")]
    PolicyNotFound {
        /// The profile name that was requested.
        profile: String,
    },

    /// The calendar provider supplied no working-day data for a date that
    /// falls inside the requested period.
    #[error("No working calendar for employee '{employee_id}' on {date}")]
    MissingCalendar {
        /// The employee the period was computed for.
        employee_id: String,
        /// The date with no calendar coverage.
        date: NaiveDate,
    },

    /// A day spec violated the calendar invariant (a holiday or leave day
    /// must carry zero expected hours).
    #[error("Invalid calendar day for employee '{employee_id}' on {date}: {message}")]
    InvalidDaySpec {
        /// The employee the day belongs to.
        employee_id: String,
        /// The offending date.
        date: NaiveDate,
        /// A description of the violated invariant.
        message: String,
    },

    /// A punch was malformed (check-out not after check-in, or the punch
    /// spans more than 24 hours).
    #[error("Invalid punch for employee '{employee_id}' at {check_in}: {message}")]
    InvalidPunch {
        /// The employee the punch belongs to.
        employee_id: String,
        /// The check-in timestamp of the rejected punch.
        check_in: NaiveDateTime,
        /// A description of what made the punch invalid.
        message: String,
    },

    /// An attempt was made to regenerate a period whose summary has
    /// already been validated.
    #[error(
        "A validated summary already exists for employee '{employee_id}' \
         overlapping {date_from}..{date_to}"
    )]
    DuplicateRun {
        /// The employee whose period was requested.
        employee_id: String,
        /// Start of the requested period.
        date_from: NaiveDate,
        /// End of the requested period.
        date_to: NaiveDate,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
