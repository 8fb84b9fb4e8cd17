//! Period summary aggregation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    AttendanceMode, CalcCycle, DailyRecord, DayStatus, ManualLine, PeriodSummary, Policy,
    ReconcileWarning, SummaryState,
};

use super::overtime::evaluate_ot_ded;

/// Rolls daily records into a draft [`PeriodSummary`].
///
/// `worked_days` counts every day that is neither absent nor unpaid
/// (weekends, holidays and paid leave all count as worked for payroll
/// day-rate purposes); `absent_days` counts absences only. Under mode
/// `na` no attendance reconciliation happened, so `absent_days` is
/// forced to zero and no overtime or deduction is reported.
///
/// Under a daily cycle the period totals are straight sums of the daily
/// figures. Under a monthly cycle the daily records carry zero overtime
/// and deduction; here the worked and expected hours of the countable
/// days (status not absent/leave/unpaid) are aggregated and the
/// threshold test runs once against the aggregate difference.
pub fn build_summary(
    employee_id: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
    policy: &Policy,
    daily_records: Vec<DailyRecord>,
    manual_lines: Vec<ManualLine>,
    warnings: Vec<ReconcileWarning>,
) -> PeriodSummary {
    let na_mode = policy.mode == AttendanceMode::Na;

    let worked_days = daily_records
        .iter()
        .filter(|r| !matches!(r.status, DayStatus::Absent | DayStatus::Unpaid))
        .count() as u32;
    let absent_days = if na_mode {
        0
    } else {
        daily_records
            .iter()
            .filter(|r| r.status == DayStatus::Absent)
            .count() as u32
    };

    let total_worked: Decimal = daily_records
        .iter()
        .map(|r| r.worked_hours + r.adjustment_hours)
        .sum();

    let (total_overtime, total_deduction) = if na_mode {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        match policy.cycle {
            CalcCycle::Daily => (
                daily_records.iter().map(|r| r.overtime_hours).sum(),
                daily_records.iter().map(|r| r.deduction_hours).sum(),
            ),
            CalcCycle::Monthly => {
                let countable = |r: &&DailyRecord| {
                    !matches!(
                        r.status,
                        DayStatus::Absent | DayStatus::Leave | DayStatus::Unpaid
                    )
                };
                let aggregate_worked: Decimal = daily_records
                    .iter()
                    .filter(countable)
                    .map(|r| r.worked_hours + r.adjustment_hours)
                    .sum();
                let aggregate_expected: Decimal = daily_records
                    .iter()
                    .filter(countable)
                    .map(|r| r.expected_hours)
                    .sum();
                evaluate_ot_ded(aggregate_worked, aggregate_expected, policy)
            }
        }
    };

    PeriodSummary {
        employee_id: employee_id.to_string(),
        date_from,
        date_to,
        policy: policy.clone(),
        daily_records,
        worked_days,
        absent_days,
        total_worked,
        total_overtime,
        total_deduction,
        manual_lines,
        warnings,
        state: SummaryState::Draft,
    }
}
