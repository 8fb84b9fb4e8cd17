//! Flexible worked-hours aggregation.
//!
//! Under flexible mode the worked hours are the net sum of punch
//! durations. When a daily break allowance is configured and the gross
//! span (first check-in to last check-out) exceeds the expected hours,
//! an employee who took less than the configured break is penalized for
//! the unredeemed remainder.

use rust_decimal::Decimal;

use crate::models::{DaySpec, Policy, Punch};

use super::hours_between;
use super::strategy::WorkedHoursStrategy;

/// The flexible mode strategy.
pub struct FlexibleAggregator;

impl WorkedHoursStrategy for FlexibleAggregator {
    fn worked_hours(&self, day: &DaySpec, punches: &[Punch], policy: &Policy) -> Decimal {
        flexible_worked_hours(punches, day.expected_hours, policy.flexible_break_hours)
    }
}

/// Computes flexible-mode worked hours for one day.
///
/// With `flexible_break_hours == 0` the result is exactly the sum of
/// punch durations. Otherwise, once the gross span exceeds
/// `expected_hours`, any shortfall between the break actually taken
/// (gross minus net) and the configured break is subtracted from the net.
/// The result never goes below zero.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Punch;
/// use attendance_engine::reconcile::flexible_worked_hours;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dt = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
///
/// // 10h straight through on an 8h day with a 1h configured break:
/// // no break taken, so one full hour is docked.
/// let punches = vec![Punch {
///     check_in: dt("2026-03-02 09:00:00"),
///     check_out: dt("2026-03-02 19:00:00"),
/// }];
/// let worked = flexible_worked_hours(
///     &punches,
///     Decimal::from_str("8.0").unwrap(),
///     Decimal::ONE,
/// );
/// assert_eq!(worked, Decimal::from_str("9.0").unwrap());
/// ```
pub fn flexible_worked_hours(
    punches: &[Punch],
    expected_hours: Decimal,
    flexible_break_hours: Decimal,
) -> Decimal {
    if punches.is_empty() {
        return Decimal::ZERO;
    }

    let mut net_worked: Decimal = punches.iter().map(Punch::duration_hours).sum();

    if flexible_break_hours > Decimal::ZERO {
        let first_in = punches.iter().map(|p| p.check_in).min();
        let last_out = punches.iter().map(|p| p.check_out).max();
        if let (Some(first_in), Some(last_out)) = (first_in, last_out) {
            let gross_span = hours_between(first_in, last_out);
            if gross_span > expected_hours {
                let break_taken = gross_span - net_worked;
                if break_taken < flexible_break_hours {
                    net_worked -= flexible_break_hours - break_taken;
                }
            }
        }
    }

    net_worked.max(Decimal::ZERO)
}
