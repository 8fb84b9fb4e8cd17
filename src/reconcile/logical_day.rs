//! Logical-day normalization.
//!
//! Punches are grouped into "logical days" by shifting each check-in back
//! by the configured day-start offset before taking its calendar date.
//! A 4-hour offset keeps a night shift's post-midnight punches attached
//! to the shift's start day.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::error::EngineResult;
use crate::models::{AttendanceDay, Punch};

/// Assigns punches to logical days.
///
/// Punches are validated first: a punch whose check-out is not after its
/// check-in, or that spans more than 24 hours, fails the whole call with
/// `InvalidPunch` rather than being silently truncated. Valid punches are
/// sorted by check-in and grouped by `date(check_in - offset)`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Punch;
/// use attendance_engine::reconcile::assign_logical_days;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// // A punch just after midnight belongs to the previous logical day
/// // under a 4-hour offset.
/// let punch = Punch {
///     check_in: NaiveDateTime::parse_from_str("2026-03-03 00:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     check_out: NaiveDateTime::parse_from_str("2026-03-03 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// };
/// let days = assign_logical_days(&[punch], 240, "emp_001").unwrap();
/// assert_eq!(days[0].logical_date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// ```
pub fn assign_logical_days(
    punches: &[Punch],
    day_start_offset_minutes: i64,
    employee_id: &str,
) -> EngineResult<Vec<AttendanceDay>> {
    let offset = Duration::minutes(day_start_offset_minutes);

    let mut sorted: Vec<Punch> = punches.to_vec();
    sorted.sort_by_key(|p| (p.check_in, p.check_out));

    let mut grouped: BTreeMap<NaiveDate, Vec<Punch>> = BTreeMap::new();
    for punch in sorted {
        punch.validate(employee_id)?;
        let logical_date = (punch.check_in - offset).date();
        grouped.entry(logical_date).or_default().push(punch);
    }

    Ok(grouped
        .into_iter()
        .map(|(logical_date, punches)| AttendanceDay {
            logical_date,
            punches,
        })
        .collect())
}
