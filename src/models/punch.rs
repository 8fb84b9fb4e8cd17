//! Punch models: raw attendance events and their logical-day grouping.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A raw check-in/check-out pair as recorded by the attendance device.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Punch;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let punch = Punch {
///     check_in: NaiveDateTime::parse_from_str("2026-03-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     check_out: NaiveDateTime::parse_from_str("2026-03-02 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// };
/// assert_eq!(punch.duration_hours(), Decimal::new(80, 1)); // 8.0 hours
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    /// The check-in timestamp.
    pub check_in: NaiveDateTime,
    /// The check-out timestamp.
    pub check_out: NaiveDateTime,
}

impl Punch {
    /// Returns the punch duration in hours.
    pub fn duration_hours(&self) -> Decimal {
        let seconds = (self.check_out - self.check_in).num_seconds();
        Decimal::new(seconds, 0) / Decimal::new(3600, 0)
    }

    /// Validates the punch.
    ///
    /// A punch whose check-out is not strictly after its check-in, or that
    /// spans more than 24 hours, is rejected outright rather than clamped.
    pub fn validate(&self, employee_id: &str) -> EngineResult<()> {
        if self.check_out <= self.check_in {
            return Err(EngineError::InvalidPunch {
                employee_id: employee_id.to_string(),
                check_in: self.check_in,
                message: "check-out is not after check-in".to_string(),
            });
        }
        if self.check_out - self.check_in > Duration::hours(24) {
            return Err(EngineError::InvalidPunch {
                employee_id: employee_id.to_string(),
                check_in: self.check_in,
                message: "punch spans more than 24 hours".to_string(),
            });
        }
        Ok(())
    }
}

/// Punches assigned to one logical date.
///
/// A logical date is the calendar date of `check_in - day_start_offset`,
/// so punches crossing midnight on a night shift stay attached to the
/// shift's start day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDay {
    /// The logical date the punches belong to.
    pub logical_date: NaiveDate,
    /// The punches of that logical day, in check-in order.
    pub punches: Vec<Punch>,
}
