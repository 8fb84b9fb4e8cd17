//! Daily reconciliation.
//!
//! Produces one [`DailyRecord`] per calendar day by dispatching to the
//! mode strategy, folding in the day's adjustment hours, classifying the
//! status, and running the overtime/deduction evaluator when the policy
//! cycle is daily.

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::EngineResult;
use crate::models::{
    AttendanceMode, CalcCycle, DailyRecord, DaySpec, Policy, Punch, ReconcileWarning,
};

use super::overtime::evaluate_ot_ded;
use super::status::classify_day;
use super::strategy::strategy_for;

/// Reconciles one logical day.
///
/// The day spec is validated first (a holiday or leave day must carry
/// zero expected hours). Under mode `na` the record carries zeros across
/// the board. Otherwise the mode strategy computes the worked hours,
/// which together with `adjustment_hours` drive the status and the
/// daily-cycle overtime/deduction evaluation.
///
/// Two data-quality conditions are surfaced as warnings alongside the
/// record rather than failing the day:
///
/// - punches on a leave or holiday day ([`ReconcileWarning::OverlapViolation`]);
///   the day's status is unaffected and its worked hours stay zero,
/// - a scheduled day with no calendar intervals
///   ([`ReconcileWarning::PartialData`]); worked hours default to zero
///   rather than guessing an interval.
pub fn reconcile_day(
    day: &DaySpec,
    punches: &[Punch],
    adjustment_hours: Decimal,
    policy: &Policy,
    employee_id: &str,
) -> EngineResult<(DailyRecord, Vec<ReconcileWarning>)> {
    day.validate(employee_id)?;

    let mut warnings = Vec::new();
    let na_mode = policy.mode == AttendanceMode::Na;

    let worked_hours = if na_mode {
        Decimal::ZERO
    } else if day.is_day_off() {
        if !punches.is_empty() {
            warn!(
                employee_id,
                date = %day.date,
                "punches recorded on a leave/holiday day"
            );
            warnings.push(ReconcileWarning::OverlapViolation {
                employee_id: employee_id.to_string(),
                date: day.date,
            });
        }
        Decimal::ZERO
    } else if day.expected_hours > Decimal::ZERO && day.intervals.is_empty() {
        warn!(
            employee_id,
            date = %day.date,
            "no calendar intervals for a scheduled day, defaulting worked hours to zero"
        );
        warnings.push(ReconcileWarning::PartialData {
            employee_id: employee_id.to_string(),
            date: day.date,
        });
        Decimal::ZERO
    } else {
        strategy_for(policy.mode).worked_hours(day, punches, policy)
    };

    let adjustment_hours = if na_mode {
        Decimal::ZERO
    } else {
        adjustment_hours
    };
    let worked_total = worked_hours + adjustment_hours;
    let status = classify_day(day, worked_total);

    let (overtime_hours, deduction_hours) =
        if na_mode || day.is_day_off() || policy.cycle != CalcCycle::Daily {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            evaluate_ot_ded(worked_total, day.expected_hours, policy)
        };

    Ok((
        DailyRecord {
            date: day.date,
            day_of_week: day.date.format("%A").to_string(),
            expected_hours: day.expected_hours,
            worked_hours,
            overtime_hours,
            deduction_hours,
            adjustment_hours,
            status,
        },
        warnings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceMode, DayStatus, WorkInterval};
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn workday() -> DaySpec {
        DaySpec {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            expected_hours: dec("8.0"),
            intervals: vec![WorkInterval {
                start: make_datetime("2026-03-02", "08:00:00"),
                end: make_datetime("2026-03-02", "17:00:00"),
            }],
            is_holiday: false,
            leave_ref: None,
            leave_is_unpaid: false,
        }
    }

    fn punch(in_time: &str, out_time: &str) -> Punch {
        Punch {
            check_in: make_datetime("2026-03-02", in_time),
            check_out: make_datetime("2026-03-02", out_time),
        }
    }

    fn strict_daily() -> Policy {
        Policy {
            mode: AttendanceMode::Strict,
            overtime_enabled: true,
            overtime_lag_minutes: dec("30"),
            ..Policy::default()
        }
    }

    #[test]
    fn test_strict_day_with_trailing_overtime() {
        // Expected 8h 08:00-17:00, punch 09:00-18:00, lag 30min.
        let (record, warnings) = reconcile_day(
            &workday(),
            &[punch("09:00:00", "18:00:00")],
            Decimal::ZERO,
            &strict_daily(),
            "emp_001",
        )
        .unwrap();
        assert_eq!(record.worked_hours, dec("9.0"));
        assert_eq!(record.overtime_hours, dec("1.0"));
        assert_eq!(record.deduction_hours, Decimal::ZERO);
        assert_eq!(record.status, DayStatus::Attendance);
        assert_eq!(record.day_of_week, "Monday");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_na_mode_emits_zeros_unconditionally() {
        let policy = Policy {
            mode: AttendanceMode::Na,
            overtime_enabled: true,
            ..Policy::default()
        };
        let (record, warnings) = reconcile_day(
            &workday(),
            &[punch("08:00:00", "19:00:00")],
            dec("2.0"),
            &policy,
            "emp_001",
        )
        .unwrap();
        assert_eq!(record.worked_hours, Decimal::ZERO);
        assert_eq!(record.overtime_hours, Decimal::ZERO);
        assert_eq!(record.deduction_hours, Decimal::ZERO);
        assert_eq!(record.adjustment_hours, Decimal::ZERO);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_leave_day_with_stray_punch_warns_but_stays_leave() {
        let day = DaySpec {
            expected_hours: Decimal::ZERO,
            intervals: vec![],
            leave_ref: Some("LV-2026-014".to_string()),
            ..workday()
        };
        let (record, warnings) = reconcile_day(
            &day,
            &[punch("09:00:00", "12:00:00")],
            Decimal::ZERO,
            &strict_daily(),
            "emp_001",
        )
        .unwrap();
        assert_eq!(record.status, DayStatus::Leave);
        assert_eq!(record.worked_hours, Decimal::ZERO);
        assert_eq!(record.overtime_hours, Decimal::ZERO);
        assert_eq!(record.deduction_hours, Decimal::ZERO);
        assert!(matches!(
            warnings.as_slice(),
            [ReconcileWarning::OverlapViolation { .. }]
        ));
    }

    #[test]
    fn test_scheduled_day_without_intervals_warns_partial_data() {
        let day = DaySpec {
            intervals: vec![],
            ..workday()
        };
        let (record, warnings) = reconcile_day(
            &day,
            &[punch("09:00:00", "17:00:00")],
            Decimal::ZERO,
            &strict_daily(),
            "emp_001",
        )
        .unwrap();
        assert_eq!(record.worked_hours, Decimal::ZERO);
        assert_eq!(record.status, DayStatus::Absent);
        assert!(matches!(
            warnings.as_slice(),
            [ReconcileWarning::PartialData { .. }]
        ));
    }

    #[test]
    fn test_adjustment_feeds_evaluator_and_status() {
        // Worked 6h + 2h adjustment makes the day whole.
        let policy = Policy {
            mode: AttendanceMode::Strict,
            deduction_enabled: true,
            deduction_lag_minutes: dec("15"),
            ..Policy::default()
        };
        let (record, _) = reconcile_day(
            &workday(),
            &[punch("08:00:00", "14:00:00")],
            dec("2.0"),
            &policy,
            "emp_001",
        )
        .unwrap();
        assert_eq!(record.worked_hours, dec("6.0"));
        assert_eq!(record.adjustment_hours, dec("2.0"));
        assert_eq!(record.deduction_hours, Decimal::ZERO);
        assert_eq!(record.status, DayStatus::Attendance);
    }

    #[test]
    fn test_shortfall_deducted_under_daily_cycle() {
        let policy = Policy {
            mode: AttendanceMode::Strict,
            deduction_enabled: true,
            deduction_lag_minutes: dec("15"),
            ..Policy::default()
        };
        let (record, _) = reconcile_day(
            &workday(),
            &[punch("08:00:00", "14:00:00")],
            Decimal::ZERO,
            &policy,
            "emp_001",
        )
        .unwrap();
        assert_eq!(record.deduction_hours, dec("2.0"));
        assert_eq!(record.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_monthly_cycle_keeps_daily_figures_at_zero() {
        let policy = Policy {
            cycle: CalcCycle::Monthly,
            ..strict_daily()
        };
        let (record, _) = reconcile_day(
            &workday(),
            &[punch("09:00:00", "18:00:00")],
            Decimal::ZERO,
            &policy,
            "emp_001",
        )
        .unwrap();
        assert_eq!(record.worked_hours, dec("9.0"));
        assert_eq!(record.overtime_hours, Decimal::ZERO);
        assert_eq!(record.deduction_hours, Decimal::ZERO);
    }

    #[test]
    fn test_invalid_day_spec_is_rejected() {
        let day = DaySpec {
            is_holiday: true, // expected_hours stays 8.0
            ..workday()
        };
        let result = reconcile_day(&day, &[], Decimal::ZERO, &strict_daily(), "emp_001");
        assert!(matches!(
            result,
            Err(crate::error::EngineError::InvalidDaySpec { .. })
        ));
    }

    #[test]
    fn test_empty_scheduled_day_is_absent() {
        let (record, warnings) =
            reconcile_day(&workday(), &[], Decimal::ZERO, &strict_daily(), "emp_001").unwrap();
        assert_eq!(record.status, DayStatus::Absent);
        assert_eq!(record.worked_hours, Decimal::ZERO);
        assert_eq!(record.deduction_hours, Decimal::ZERO);
        assert!(warnings.is_empty());
    }
}
