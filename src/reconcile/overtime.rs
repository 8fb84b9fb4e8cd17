//! Overtime and deduction evaluation.
//!
//! Compares a worked total (including adjustments) against the expected
//! hours for the same window and converts the difference into overtime or
//! deduction hours, each gated by its own enable flag and lag threshold.
//! The two outcomes are mutually exclusive: a total cannot produce both.

use rust_decimal::Decimal;

use crate::models::Policy;

/// Evaluates overtime and deduction hours for one calculation window.
///
/// The window is a single day under a daily cycle or the whole period
/// under a monthly cycle. Returns `(overtime_hours, deduction_hours)`,
/// at most one of which is non-zero.
///
/// Nothing accrues when the worked total is zero or negative: a day
/// with no attendance is an absence, not a shortfall to deduct.
///
/// Surplus must reach the overtime lag before any overtime is paid,
/// and likewise shortfall must reach the deduction lag; once at the
/// threshold the full difference counts, not just the excess over the
/// lag.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Policy;
/// use attendance_engine::reconcile::evaluate_ot_ded;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let policy = Policy {
///     overtime_enabled: true,
///     overtime_lag_minutes: Decimal::from_str("30").unwrap(),
///     ..Policy::default()
/// };
/// let (ot, ded) = evaluate_ot_ded(
///     Decimal::from_str("9.0").unwrap(),
///     Decimal::from_str("8.0").unwrap(),
///     &policy,
/// );
/// assert_eq!(ot, Decimal::ONE);
/// assert_eq!(ded, Decimal::ZERO);
/// ```
pub fn evaluate_ot_ded(
    worked_total: Decimal,
    expected_hours: Decimal,
    policy: &Policy,
) -> (Decimal, Decimal) {
    if worked_total <= Decimal::ZERO {
        return (Decimal::ZERO, Decimal::ZERO);
    }

    let difference = worked_total - expected_hours;

    if policy.overtime_enabled && difference >= policy.overtime_lag_hours() {
        (difference, Decimal::ZERO)
    } else if policy.deduction_enabled && -difference >= policy.deduction_lag_hours() {
        (Decimal::ZERO, -difference)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    }
}
