//! Attendance policy read from the employee's contract configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How worked hours are reconciled against the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceMode {
    /// Punches are clipped to calendar intervals and capped at expected
    /// hours, with explicit trailing overtime.
    Strict,
    /// Worked hours are the net punch sum, penalized for an unredeemed
    /// configured break.
    Flexible,
    /// No reconciliation is performed; worked hours are always zero.
    Na,
}

/// Whether overtime/deduction thresholds are evaluated per day or once per
/// aggregated period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcCycle {
    /// Evaluate lag thresholds once per day.
    Daily,
    /// Evaluate lag thresholds once over the whole period aggregate.
    Monthly,
}

/// Convention for counting "days in a month" when prorating
/// partial-period pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DaysInMonthPolicy {
    /// A constant 30 days regardless of the calendar.
    Standard30,
    /// The actual number of days in the reference month.
    CalendarMonth,
    /// Weekdays (Mon-Fri) from day 1 of the month through the reference
    /// date inclusive.
    WorkingDays,
}

/// The attendance policy of one employee contract.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceMode, Policy};
///
/// let policy = Policy::default();
/// assert_eq!(policy.mode, AttendanceMode::Flexible);
/// assert!(!policy.overtime_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// The reconciliation mode.
    pub mode: AttendanceMode,
    /// The overtime/deduction evaluation cycle.
    pub cycle: CalcCycle,
    /// Whether overtime is recorded at all.
    #[serde(default)]
    pub overtime_enabled: bool,
    /// Minutes of positive deviation required before overtime is recorded.
    #[serde(default)]
    pub overtime_lag_minutes: Decimal,
    /// Whether deductions are recorded at all.
    #[serde(default)]
    pub deduction_enabled: bool,
    /// Minutes of negative deviation required before a deduction is
    /// recorded.
    #[serde(default)]
    pub deduction_lag_minutes: Decimal,
    /// Daily break hours an employee is expected to take under flexible
    /// mode; zero disables the break penalty.
    #[serde(default)]
    pub flexible_break_hours: Decimal,
    /// Days-in-month convention used for proration.
    pub days_in_month_policy: DaysInMonthPolicy,
    /// Offset applied to punches before logical-day grouping, in whole
    /// minutes (e.g. 240 keeps a night shift's post-midnight punches on
    /// the shift's start day).
    #[serde(default)]
    pub day_start_offset_minutes: i64,
}

impl Policy {
    /// The overtime lag threshold expressed in hours.
    pub fn overtime_lag_hours(&self) -> Decimal {
        self.overtime_lag_minutes / Decimal::new(60, 0)
    }

    /// The deduction lag threshold expressed in hours.
    pub fn deduction_lag_hours(&self) -> Decimal {
        self.deduction_lag_minutes / Decimal::new(60, 0)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            mode: AttendanceMode::Flexible,
            cycle: CalcCycle::Daily,
            overtime_enabled: false,
            overtime_lag_minutes: Decimal::ZERO,
            deduction_enabled: false,
            deduction_lag_minutes: Decimal::ZERO,
            flexible_break_hours: Decimal::ZERO,
            days_in_month_policy: DaysInMonthPolicy::Standard30,
            day_start_offset_minutes: 0,
        }
    }
}
