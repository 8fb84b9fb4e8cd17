//! Calendar models: working intervals and per-day calendar specs.
//!
//! These types form the boundary with the Calendar Interval Provider,
//! which supplies the working intervals, holiday flags, and leave overlaps
//! for an employee over a date range.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single working interval within one calendar day.
///
/// # Example
///
/// ```
/// use attendance_engine::models::WorkInterval;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let interval = WorkInterval {
///     start: NaiveDateTime::parse_from_str("2026-03-02 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2026-03-02 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// };
/// assert_eq!(interval.duration_hours(), Decimal::new(40, 1)); // 4.0 hours
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkInterval {
    /// The start of the working interval.
    pub start: NaiveDateTime,
    /// The end of the working interval.
    pub end: NaiveDateTime,
}

impl WorkInterval {
    /// Returns the duration of the interval in hours.
    pub fn duration_hours(&self) -> Decimal {
        let seconds = (self.end - self.start).num_seconds();
        Decimal::new(seconds, 0) / Decimal::new(3600, 0)
    }
}

/// One calendar day for one employee, as supplied by the Calendar Interval
/// Provider.
///
/// Invariant: a holiday or leave day carries zero expected hours. The
/// daily reconciliation calculator rejects day specs that violate it
/// rather than guessing which figure to trust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySpec {
    /// The calendar date.
    pub date: NaiveDate,
    /// Hours the employee is expected to work on this date.
    pub expected_hours: Decimal,
    /// Working intervals scheduled on this date.
    #[serde(default)]
    pub intervals: Vec<WorkInterval>,
    /// Whether this date is a public holiday.
    #[serde(default)]
    pub is_holiday: bool,
    /// Reference to an approved leave overlapping this date, if any.
    #[serde(default)]
    pub leave_ref: Option<String>,
    /// Whether the overlapping leave is unpaid.
    #[serde(default)]
    pub leave_is_unpaid: bool,
}

impl DaySpec {
    /// Returns true when the day is a holiday or covered by leave.
    pub fn is_day_off(&self) -> bool {
        self.is_holiday || self.leave_ref.is_some()
    }

    /// Checks the calendar invariant for this day.
    ///
    /// A holiday or leave day must carry `expected_hours == 0`; anything
    /// else is a provider misconfiguration and is reported rather than
    /// silently corrected.
    pub fn validate(&self, employee_id: &str) -> EngineResult<()> {
        if self.is_day_off() && self.expected_hours != Decimal::ZERO {
            return Err(EngineError::InvalidDaySpec {
                employee_id: employee_id.to_string(),
                date: self.date,
                message: "holiday/leave day carries non-zero expected hours".to_string(),
            });
        }
        Ok(())
    }

    /// Chronologically last interval of the day, if any intervals exist.
    pub fn last_interval(&self) -> Option<&WorkInterval> {
        self.intervals.iter().max_by_key(|i| i.end)
    }
}
