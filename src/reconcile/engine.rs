//! Period computation and recompute orchestration.
//!
//! [`compute_period`] is the pure core: given the calendar days, punches
//! and adjustments for one employee and range, it produces a draft
//! [`PeriodSummary`]. [`ReconciliationEngine`] wraps it with provider
//! traits, a per-employee summary store, and the recompute rules: a
//! validated summary is never silently regenerated, and regeneration of
//! a range is a destructive replace serialized per employee.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdjustmentLine, DaySpec, ManualLine, PeriodSummary, Policy, Punch, SummaryState,
};

use super::daily::reconcile_day;
use super::logical_day::assign_logical_days;
use super::summary::build_summary;

/// Source of calendar day specs for an employee.
pub trait CalendarProvider: Send + Sync {
    /// Returns the day specs covering `date_from..=date_to`.
    fn day_specs(
        &self,
        employee_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> EngineResult<Vec<DaySpec>>;
}

/// Source of attendance punches and approved per-day adjustments.
pub trait AttendanceProvider: Send + Sync {
    /// Returns the raw punches whose check-in falls in the range.
    fn punches(
        &self,
        employee_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> EngineResult<Vec<Punch>>;

    /// Returns approved adjustment lines dated in the range.
    fn adjustments(
        &self,
        employee_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> EngineResult<Vec<AdjustmentLine>>;
}

/// Calendar provider backed by a map, for tests and the HTTP API.
#[derive(Debug, Default)]
pub struct InMemoryCalendar {
    days: HashMap<String, Vec<DaySpec>>,
}

impl InMemoryCalendar {
    /// Registers the day specs for an employee.
    pub fn insert(&mut self, employee_id: impl Into<String>, days: Vec<DaySpec>) {
        self.days.insert(employee_id.into(), days);
    }
}

impl CalendarProvider for InMemoryCalendar {
    fn day_specs(
        &self,
        employee_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> EngineResult<Vec<DaySpec>> {
        Ok(self
            .days
            .get(employee_id)
            .map(|days| {
                days.iter()
                    .filter(|d| d.date >= date_from && d.date <= date_to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Attendance provider backed by maps, for tests and the HTTP API.
#[derive(Debug, Default)]
pub struct InMemoryAttendance {
    punches: HashMap<String, Vec<Punch>>,
    adjustments: HashMap<String, Vec<AdjustmentLine>>,
}

impl InMemoryAttendance {
    /// Registers the punches for an employee.
    pub fn insert_punches(&mut self, employee_id: impl Into<String>, punches: Vec<Punch>) {
        self.punches.insert(employee_id.into(), punches);
    }

    /// Registers approved adjustment lines for an employee.
    pub fn insert_adjustments(
        &mut self,
        employee_id: impl Into<String>,
        adjustments: Vec<AdjustmentLine>,
    ) {
        self.adjustments.insert(employee_id.into(), adjustments);
    }
}

impl AttendanceProvider for InMemoryAttendance {
    fn punches(
        &self,
        employee_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> EngineResult<Vec<Punch>> {
        Ok(self
            .punches
            .get(employee_id)
            .map(|punches| {
                punches
                    .iter()
                    .filter(|p| p.check_in.date() >= date_from && p.check_in.date() <= date_to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn adjustments(
        &self,
        employee_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> EngineResult<Vec<AdjustmentLine>> {
        Ok(self
            .adjustments
            .get(employee_id)
            .map(|lines| {
                lines
                    .iter()
                    .filter(|l| l.date >= date_from && l.date <= date_to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Computes a draft period summary from already-loaded inputs.
///
/// Every date in `date_from..=date_to` must be covered by a day spec;
/// a gap is a provider misconfiguration reported as `MissingCalendar`
/// rather than guessed around. Punches are grouped into logical days
/// via the policy's day-start offset first; punches whose logical date
/// falls outside the range are excluded. Days are processed in
/// chronological order.
pub fn compute_period(
    employee_id: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
    policy: &Policy,
    days: &[DaySpec],
    punches: &[Punch],
    adjustments: &[AdjustmentLine],
    manual_lines: Vec<ManualLine>,
) -> EngineResult<PeriodSummary> {
    let specs_by_date: BTreeMap<NaiveDate, &DaySpec> =
        days.iter().map(|d| (d.date, d)).collect();

    let attendance_days =
        assign_logical_days(punches, policy.day_start_offset_minutes, employee_id)?;
    let punches_by_date: BTreeMap<NaiveDate, Vec<Punch>> = attendance_days
        .into_iter()
        .filter(|d| d.logical_date >= date_from && d.logical_date <= date_to)
        .map(|d| (d.logical_date, d.punches))
        .collect();

    let mut adjustment_by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for line in adjustments {
        *adjustment_by_date.entry(line.date).or_default() += line.hours;
    }

    let mut daily_records = Vec::new();
    let mut warnings = Vec::new();
    let mut date = date_from;
    while date <= date_to {
        let spec = specs_by_date
            .get(&date)
            .ok_or_else(|| EngineError::MissingCalendar {
                employee_id: employee_id.to_string(),
                date,
            })?;
        let day_punches = punches_by_date.get(&date).map_or(&[][..], Vec::as_slice);
        let adjustment = adjustment_by_date
            .get(&date)
            .copied()
            .unwrap_or(Decimal::ZERO);

        let (record, day_warnings) =
            reconcile_day(spec, day_punches, adjustment, policy, employee_id)?;
        daily_records.push(record);
        warnings.extend(day_warnings);

        let Some(next) = date.succ_opt() else { break };
        date = next;
    }

    Ok(build_summary(
        employee_id,
        date_from,
        date_to,
        policy,
        daily_records,
        manual_lines,
        warnings,
    ))
}

/// One employee's entry in a batch recompute.
#[derive(Debug, Clone)]
pub struct RecomputeRequest {
    /// Employee whose period is recomputed.
    pub employee_id: String,
    /// First day of the period, inclusive.
    pub date_from: NaiveDate,
    /// Last day of the period, inclusive.
    pub date_to: NaiveDate,
    /// Policy governing the computation.
    pub policy: Policy,
    /// Approved manual lines to merge into the summary.
    pub manual_lines: Vec<ManualLine>,
}

type SummarySlot = Arc<Mutex<Vec<PeriodSummary>>>;

/// Recompute orchestrator with a per-employee summary store.
///
/// Summaries are held per employee behind individual locks, so batches
/// over distinct employees proceed in parallel while recomputes for the
/// same employee are serialized.
pub struct ReconciliationEngine<C, A> {
    calendar: C,
    attendance: A,
    slots: Mutex<HashMap<String, SummarySlot>>,
}

impl<C: CalendarProvider, A: AttendanceProvider> ReconciliationEngine<C, A> {
    /// Creates an engine over the given providers.
    pub fn new(calendar: C, attendance: A) -> Self {
        Self {
            calendar,
            attendance,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, employee_id: &str) -> SummarySlot {
        let mut slots = lock(&self.slots);
        Arc::clone(slots.entry(employee_id.to_string()).or_default())
    }

    /// Recomputes the summary for one employee and range.
    ///
    /// Fails with `DuplicateRun` when a validated summary overlapping
    /// the range already exists. Otherwise any stored summary for the
    /// exact range is replaced in one step under the employee's lock.
    pub fn recompute(
        &self,
        employee_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
        policy: &Policy,
        manual_lines: Vec<ManualLine>,
    ) -> EngineResult<PeriodSummary> {
        let slot = self.slot(employee_id);
        let mut stored = lock(&slot);

        let validated_overlap = stored.iter().any(|s| {
            s.state == SummaryState::Validated && s.date_from <= date_to && date_from <= s.date_to
        });
        if validated_overlap {
            warn!(employee_id, %date_from, %date_to, "recompute refused, validated summary overlaps");
            return Err(EngineError::DuplicateRun {
                employee_id: employee_id.to_string(),
                date_from,
                date_to,
            });
        }

        let days = self.calendar.day_specs(employee_id, date_from, date_to)?;
        let punches = self.attendance.punches(employee_id, date_from, date_to)?;
        let adjustments = self.attendance.adjustments(employee_id, date_from, date_to)?;

        let summary = compute_period(
            employee_id,
            date_from,
            date_to,
            policy,
            &days,
            &punches,
            &adjustments,
            manual_lines,
        )?;

        stored.retain(|s| !(s.date_from == date_from && s.date_to == date_to));
        stored.push(summary.clone());
        info!(
            employee_id,
            %date_from,
            %date_to,
            worked_days = summary.worked_days,
            absent_days = summary.absent_days,
            "period summary recomputed"
        );
        Ok(summary)
    }

    /// Marks the stored summary for the exact range as validated.
    ///
    /// The transition is one-way; validating an already-validated
    /// summary is a no-op.
    pub fn validate(
        &self,
        employee_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> EngineResult<()> {
        let slot = self.slot(employee_id);
        let mut stored = lock(&slot);
        let summary = stored
            .iter_mut()
            .find(|s| s.date_from == date_from && s.date_to == date_to)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!(
                    "no summary to validate for employee '{}' over {}..{}",
                    employee_id, date_from, date_to
                ),
            })?;
        summary.state = SummaryState::Validated;
        Ok(())
    }

    /// Returns a copy of the stored summary for the exact range.
    pub fn summary(
        &self,
        employee_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Option<PeriodSummary> {
        let slot = self.slot(employee_id);
        let stored = lock(&slot);
        stored
            .iter()
            .find(|s| s.date_from == date_from && s.date_to == date_to)
            .cloned()
    }

    /// Recomputes a batch of employees.
    ///
    /// A failure for one employee is reported in its slot of the result
    /// and never aborts the rest of the batch.
    pub fn recompute_batch(
        &self,
        requests: Vec<RecomputeRequest>,
    ) -> Vec<(String, EngineResult<PeriodSummary>)> {
        requests
            .into_iter()
            .map(|req| {
                let outcome = self.recompute(
                    &req.employee_id,
                    req.date_from,
                    req.date_to,
                    &req.policy,
                    req.manual_lines,
                );
                if let Err(error) = &outcome {
                    warn!(employee_id = %req.employee_id, %error, "batch entry failed");
                }
                (req.employee_id, outcome)
            })
            .collect()
    }
}

// Mutex poisoning only happens after a panic in another holder; the
// stored data is replace-on-write, so continuing with the inner value
// is sound.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceMode, DayStatus, WorkInterval};
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn workday(date_str: &str) -> DaySpec {
        DaySpec {
            date: make_date(date_str),
            expected_hours: dec("8.0"),
            intervals: vec![WorkInterval {
                start: make_datetime(date_str, "08:00:00"),
                end: make_datetime(date_str, "17:00:00"),
            }],
            is_holiday: false,
            leave_ref: None,
            leave_is_unpaid: false,
        }
    }

    fn weekend(date_str: &str) -> DaySpec {
        DaySpec {
            date: make_date(date_str),
            expected_hours: Decimal::ZERO,
            intervals: vec![],
            is_holiday: false,
            leave_ref: None,
            leave_is_unpaid: false,
        }
    }

    fn punch(date_str: &str, in_time: &str, out_time: &str) -> Punch {
        Punch {
            check_in: make_datetime(date_str, in_time),
            check_out: make_datetime(date_str, out_time),
        }
    }

    fn strict_policy() -> Policy {
        Policy {
            mode: AttendanceMode::Strict,
            overtime_enabled: true,
            overtime_lag_minutes: dec("30"),
            ..Policy::default()
        }
    }

    fn week_engine() -> ReconciliationEngine<InMemoryCalendar, InMemoryAttendance> {
        let mut calendar = InMemoryCalendar::default();
        calendar.insert(
            "emp_001",
            vec![
                workday("2026-03-02"),
                workday("2026-03-03"),
                workday("2026-03-04"),
                workday("2026-03-05"),
                workday("2026-03-06"),
                weekend("2026-03-07"),
                weekend("2026-03-08"),
            ],
        );
        let mut attendance = InMemoryAttendance::default();
        attendance.insert_punches(
            "emp_001",
            vec![
                punch("2026-03-02", "08:00:00", "17:00:00"),
                punch("2026-03-03", "09:00:00", "18:00:00"),
            ],
        );
        ReconciliationEngine::new(calendar, attendance)
    }

    #[test]
    fn test_compute_period_missing_calendar_day() {
        let days = vec![workday("2026-03-02")];
        let result = compute_period(
            "emp_001",
            make_date("2026-03-02"),
            make_date("2026-03-03"),
            &strict_policy(),
            &days,
            &[],
            &[],
            vec![],
        );
        assert!(matches!(
            result,
            Err(EngineError::MissingCalendar { ref date, .. }) if *date == make_date("2026-03-03")
        ));
    }

    #[test]
    fn test_compute_period_chronological_records() {
        let days = vec![workday("2026-03-02"), workday("2026-03-03")];
        let punches = vec![
            punch("2026-03-03", "08:00:00", "17:00:00"),
            punch("2026-03-02", "08:00:00", "17:00:00"),
        ];
        let summary = compute_period(
            "emp_001",
            make_date("2026-03-02"),
            make_date("2026-03-03"),
            &strict_policy(),
            &days,
            &punches,
            &[],
            vec![],
        )
        .unwrap();
        assert_eq!(summary.daily_records.len(), 2);
        assert_eq!(summary.daily_records[0].date, make_date("2026-03-02"));
        assert_eq!(summary.daily_records[1].date, make_date("2026-03-03"));
        assert_eq!(summary.total_worked, dec("16.0"));
    }

    #[test]
    fn test_compute_period_drops_out_of_range_logical_days() {
        // A punch on the 4th is outside the requested range.
        let days = vec![workday("2026-03-02")];
        let punches = vec![
            punch("2026-03-02", "08:00:00", "17:00:00"),
            punch("2026-03-04", "08:00:00", "17:00:00"),
        ];
        let summary = compute_period(
            "emp_001",
            make_date("2026-03-02"),
            make_date("2026-03-02"),
            &strict_policy(),
            &days,
            &punches,
            &[],
            vec![],
        )
        .unwrap();
        assert_eq!(summary.total_worked, dec("8.0"));
    }

    #[test]
    fn test_compute_period_applies_adjustments() {
        let days = vec![workday("2026-03-02")];
        let adjustments = vec![AdjustmentLine {
            date: make_date("2026-03-02"),
            hours: dec("8.0"),
        }];
        let summary = compute_period(
            "emp_001",
            make_date("2026-03-02"),
            make_date("2026-03-02"),
            &strict_policy(),
            &days,
            &[],
            &adjustments,
            vec![],
        )
        .unwrap();
        assert_eq!(summary.daily_records[0].status, DayStatus::Attendance);
        assert_eq!(summary.total_worked, dec("8.0"));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let engine = week_engine();
        let from = make_date("2026-03-02");
        let to = make_date("2026-03-08");
        let first = engine
            .recompute("emp_001", from, to, &strict_policy(), vec![])
            .unwrap();
        let second = engine
            .recompute("emp_001", from, to, &strict_policy(), vec![])
            .unwrap();
        let a = serde_json::to_vec(&first).unwrap();
        let b = serde_json::to_vec(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_recompute_refused_after_validation() {
        let engine = week_engine();
        let from = make_date("2026-03-02");
        let to = make_date("2026-03-08");
        engine
            .recompute("emp_001", from, to, &strict_policy(), vec![])
            .unwrap();
        engine.validate("emp_001", from, to).unwrap();
        let result = engine.recompute("emp_001", from, to, &strict_policy(), vec![]);
        assert!(matches!(result, Err(EngineError::DuplicateRun { .. })));
    }

    #[test]
    fn test_recompute_refused_on_overlapping_validated_range() {
        let engine = week_engine();
        engine
            .recompute(
                "emp_001",
                make_date("2026-03-02"),
                make_date("2026-03-04"),
                &strict_policy(),
                vec![],
            )
            .unwrap();
        engine
            .validate("emp_001", make_date("2026-03-02"), make_date("2026-03-04"))
            .unwrap();
        // A partially overlapping range must also be refused.
        let result = engine.recompute(
            "emp_001",
            make_date("2026-03-04"),
            make_date("2026-03-08"),
            &strict_policy(),
            vec![],
        );
        assert!(matches!(result, Err(EngineError::DuplicateRun { .. })));
    }

    #[test]
    fn test_recompute_replaces_draft_for_same_range() {
        let engine = week_engine();
        let from = make_date("2026-03-02");
        let to = make_date("2026-03-08");
        engine
            .recompute("emp_001", from, to, &strict_policy(), vec![])
            .unwrap();
        engine
            .recompute("emp_001", from, to, &strict_policy(), vec![])
            .unwrap();
        // Exactly one stored summary remains for the range.
        assert!(engine.summary("emp_001", from, to).is_some());
        let slot = engine.slot("emp_001");
        assert_eq!(lock(&slot).len(), 1);
    }

    #[test]
    fn test_validation_requires_existing_summary() {
        let engine = week_engine();
        let result = engine.validate("emp_001", make_date("2026-03-02"), make_date("2026-03-08"));
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_batch_isolates_failures_per_employee() {
        let engine = week_engine();
        let requests = vec![
            RecomputeRequest {
                employee_id: "emp_001".to_string(),
                date_from: make_date("2026-03-02"),
                date_to: make_date("2026-03-08"),
                policy: strict_policy(),
                manual_lines: vec![],
            },
            // emp_002 has no calendar at all.
            RecomputeRequest {
                employee_id: "emp_002".to_string(),
                date_from: make_date("2026-03-02"),
                date_to: make_date("2026-03-08"),
                policy: strict_policy(),
                manual_lines: vec![],
            },
        ];
        let outcomes = engine.recompute_batch(requests);
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].1.is_ok());
        assert!(matches!(
            outcomes[1].1,
            Err(EngineError::MissingCalendar { .. })
        ));
    }

    #[test]
    fn test_week_summary_counts() {
        let engine = week_engine();
        let summary = engine
            .recompute(
                "emp_001",
                make_date("2026-03-02"),
                make_date("2026-03-08"),
                &strict_policy(),
                vec![],
            )
            .unwrap();
        // Mon + Tue attended, Wed-Fri absent, Sat + Sun weekend.
        assert_eq!(summary.worked_days, 4);
        assert_eq!(summary.absent_days, 3);
        assert_eq!(summary.total_worked, dec("17.0"));
        assert_eq!(summary.total_overtime, dec("1.0"));
    }
}
