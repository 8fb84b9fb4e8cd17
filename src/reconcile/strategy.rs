//! Worked-hours strategy selection.
//!
//! The attendance mode on a policy is a three-way tag (`strict`,
//! `flexible`, `na`). Rather than branching inline per day, the mode is
//! resolved once per policy into a strategy implementation that the daily
//! calculator dispatches through.

use rust_decimal::Decimal;

use crate::models::{AttendanceMode, DaySpec, Policy, Punch};

use super::flexible::FlexibleAggregator;
use super::strict::StrictMatcher;

/// Computes the worked hours of one day from its punches.
pub trait WorkedHoursStrategy: Send + Sync {
    /// Returns the worked hours for `day` given its punches and the
    /// governing policy.
    fn worked_hours(&self, day: &DaySpec, punches: &[Punch], policy: &Policy) -> Decimal;
}

/// The no-op strategy for contracts with attendance mode `na`: no
/// reconciliation is performed and worked hours are always zero.
pub struct NotApplicable;

impl WorkedHoursStrategy for NotApplicable {
    fn worked_hours(&self, _day: &DaySpec, _punches: &[Punch], _policy: &Policy) -> Decimal {
        Decimal::ZERO
    }
}

/// Resolves the strategy for an attendance mode.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendanceMode;
/// use attendance_engine::reconcile::strategy_for;
///
/// let strategy = strategy_for(AttendanceMode::Strict);
/// // dispatched per day by the daily reconciliation calculator
/// # let _ = strategy;
/// ```
pub fn strategy_for(mode: AttendanceMode) -> &'static dyn WorkedHoursStrategy {
    match mode {
        AttendanceMode::Strict => &StrictMatcher,
        AttendanceMode::Flexible => &FlexibleAggregator,
        AttendanceMode::Na => &NotApplicable,
    }
}
