//! Day status classification.

use rust_decimal::Decimal;

use crate::models::{DaySpec, DayStatus};

/// Classifies one logical day after its worked hours are settled.
///
/// Precedence: leave beats everything (unpaid leave classifies as
/// `Unpaid`), then public holidays, then scheduled days off (zero
/// expected hours), then absence (no worked hours and no adjustments on
/// a scheduled day). A day that survives all of those is ordinary
/// attendance, even when the worked total falls short of expectations.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{DaySpec, DayStatus};
/// use attendance_engine::reconcile::classify_day;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = DaySpec {
///     date: NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
///     expected_hours: Decimal::ZERO,
///     intervals: vec![],
///     is_holiday: false,
///     leave_ref: None,
///     leave_is_unpaid: false,
/// };
/// assert_eq!(classify_day(&day, Decimal::ZERO), DayStatus::Weekend);
/// ```
pub fn classify_day(day: &DaySpec, worked_plus_adjustment: Decimal) -> DayStatus {
    if day.leave_ref.is_some() {
        if day.leave_is_unpaid {
            DayStatus::Unpaid
        } else {
            DayStatus::Leave
        }
    } else if day.is_holiday {
        DayStatus::Holiday
    } else if day.expected_hours == Decimal::ZERO {
        DayStatus::Weekend
    } else if worked_plus_adjustment == Decimal::ZERO {
        DayStatus::Absent
    } else {
        DayStatus::Attendance
    }
}
