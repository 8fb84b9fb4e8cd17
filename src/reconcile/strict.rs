//! Strict worked-hours matching.
//!
//! Under strict mode each punch is clipped to the calendar intervals it
//! overlaps; the clipped total is capped at the day's expected hours, and
//! time a punch runs past the end of the day's final interval is recorded
//! as trailing overtime when overtime is enabled. Interior gaps between
//! intervals (e.g. a lunch break) never produce overtime.

use rust_decimal::Decimal;

use crate::models::{DaySpec, Policy, Punch, WorkInterval};

use super::hours_between;
use super::strategy::WorkedHoursStrategy;

/// The strict mode strategy.
pub struct StrictMatcher;

impl WorkedHoursStrategy for StrictMatcher {
    fn worked_hours(&self, day: &DaySpec, punches: &[Punch], policy: &Policy) -> Decimal {
        strict_worked_hours(
            punches,
            &day.intervals,
            day.expected_hours,
            policy.overtime_enabled,
        )
    }
}

/// Computes strict-mode worked hours for one day.
///
/// Each punch is tested against every interval with a closed-range
/// overlap (`punch.end > interval.start && punch.start < interval.end`)
/// and clipped to the overlapping interval. The sum of clipped durations
/// is capped at `expected_hours`; a punch overlapping the chronologically
/// last interval and running past its end adds the excess as trailing
/// overtime when `overtime_enabled` is set.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{Punch, WorkInterval};
/// use attendance_engine::reconcile::strict_worked_hours;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dt = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let intervals = vec![WorkInterval {
///     start: dt("2026-03-02 08:00:00"),
///     end: dt("2026-03-02 17:00:00"),
/// }];
/// let punches = vec![Punch {
///     check_in: dt("2026-03-02 09:00:00"),
///     check_out: dt("2026-03-02 18:00:00"),
/// }];
///
/// // 8h clipped (capped at expected) + 1h trailing overtime
/// let worked = strict_worked_hours(
///     &punches,
///     &intervals,
///     Decimal::from_str("8.0").unwrap(),
///     true,
/// );
/// assert_eq!(worked, Decimal::from_str("9.0").unwrap());
/// ```
pub fn strict_worked_hours(
    punches: &[Punch],
    intervals: &[WorkInterval],
    expected_hours: Decimal,
    overtime_enabled: bool,
) -> Decimal {
    let Some(last_end) = intervals.iter().map(|i| i.end).max() else {
        return Decimal::ZERO;
    };

    let mut matched_hours = Decimal::ZERO;
    let mut trailing_overtime = Decimal::ZERO;

    for punch in punches {
        for interval in intervals {
            let overlaps = punch.check_out > interval.start && punch.check_in < interval.end;
            if !overlaps {
                continue;
            }

            let clipped_start = punch.check_in.max(interval.start);
            let clipped_end = punch.check_out.min(interval.end);
            matched_hours += hours_between(clipped_start, clipped_end);

            // Overtime accrues only past the day's final interval.
            if overtime_enabled && interval.end == last_end && punch.check_out > interval.end {
                trailing_overtime += hours_between(interval.end, punch.check_out);
            }
        }
    }

    matched_hours.min(expected_hours) + trailing_overtime
}
