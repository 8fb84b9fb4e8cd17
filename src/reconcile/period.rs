//! Period normalization and proration.
//!
//! Payroll amounts defined per month must be prorated when a contract
//! covers only part of the payslip window. The divisor depends on the
//! policy's days-in-month convention.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::models::{DaysInMonthPolicy, Policy};

const STANDARD_MONTH_DAYS: u32 = 30;

/// Counts Monday-Friday dates in `from..=to`. Zero when `to < from`.
pub fn weekday_count(from: NaiveDate, to: NaiveDate) -> u32 {
    let mut count = 0;
    let mut cursor = from;
    while cursor <= to {
        if !matches!(cursor.weekday(), Weekday::Sat | Weekday::Sun) {
            count += 1;
        }
        let Some(next) = cursor.succ_opt() else {
            break;
        };
        cursor = next;
    }
    count
}

/// Number of days in `reference_date`'s month under a proration policy.
///
/// - `standard30`: constant 30, whatever the calendar says.
/// - `calendar_month`: the month's true length.
/// - `working_days`: Monday-Friday dates from the 1st of the month
///   through `reference_date` inclusive.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{DaysInMonthPolicy, Policy};
/// use attendance_engine::reconcile::days_in_month;
/// use chrono::NaiveDate;
///
/// let policy = Policy {
///     days_in_month_policy: DaysInMonthPolicy::CalendarMonth,
///     ..Policy::default()
/// };
/// let feb = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
/// assert_eq!(days_in_month(&policy, feb), 28);
/// ```
pub fn days_in_month(policy: &Policy, reference_date: NaiveDate) -> u32 {
    match policy.days_in_month_policy {
        DaysInMonthPolicy::Standard30 => STANDARD_MONTH_DAYS,
        DaysInMonthPolicy::CalendarMonth => calendar_month_length(reference_date),
        DaysInMonthPolicy::WorkingDays => {
            let month_start = reference_date.with_day(1).unwrap_or(reference_date);
            weekday_count(month_start, reference_date)
        }
    }
}

fn calendar_month_length(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(STANDARD_MONTH_DAYS)
}

/// Prorates a full-period amount for partial contract validity.
///
/// `applicable_days` is the day-count overlap between the contract's
/// valid window and the payslip window, clamped at both ends. An open
/// contract end counts as unbounded. Under the `standard30` policy an
/// unclamped span (contract covers the whole payslip window) is forced
/// to exactly 30 days, so a full month always prorates to the full
/// amount regardless of its true length.
pub fn prorate(
    full_amount: Decimal,
    policy: &Policy,
    contract_from: NaiveDate,
    contract_to: Option<NaiveDate>,
    period_from: NaiveDate,
    period_to: NaiveDate,
) -> Decimal {
    let start = contract_from.max(period_from);
    let end = contract_to.map_or(period_to, |c| c.min(period_to));
    if end < start {
        return Decimal::ZERO;
    }

    let divisor = days_in_month(policy, period_to);
    if divisor == 0 {
        return Decimal::ZERO;
    }

    let unclamped = start == period_from && end == period_to;
    let applicable_days =
        if unclamped && policy.days_in_month_policy == DaysInMonthPolicy::Standard30 {
            STANDARD_MONTH_DAYS
        } else {
            (end - start).num_days() as u32 + 1
        };

    full_amount / Decimal::from(divisor) * Decimal::from(applicable_days)
}
