//! Reconciliation output models: daily records, period summaries, and the
//! coded work-entry lines handed to the payroll rule engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Policy;

/// The classification of one reconciled day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// The employee attended (or an approved adjustment covers the day).
    Attendance,
    /// A non-working day with no leave attached.
    Weekend,
    /// A working day with no worked or adjusted hours.
    Absent,
    /// A day covered by approved paid leave.
    Leave,
    /// A day covered by approved unpaid leave.
    Unpaid,
    /// A public holiday.
    Holiday,
}

/// One reconciled day of one employee's period.
///
/// Daily records are created fresh every time a period is (re)computed;
/// regeneration replaces the full set for the range rather than mutating
/// records in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// The calendar date.
    pub date: NaiveDate,
    /// The day of the week, e.g. "Monday".
    pub day_of_week: String,
    /// Hours the calendar expected for this date.
    pub expected_hours: Decimal,
    /// Hours reconciled from punches.
    pub worked_hours: Decimal,
    /// Overtime recorded for the day (daily cycle only).
    pub overtime_hours: Decimal,
    /// Deduction recorded for the day (daily cycle only).
    pub deduction_hours: Decimal,
    /// Approved adjustment hours merged into the day.
    pub adjustment_hours: Decimal,
    /// The day's status classification.
    pub status: DayStatus,
}

/// An approved per-day adjustment from the external approval workflow.
///
/// Adjustment hours are additive: they merge into the day's
/// `adjustment_hours` before status classification and the
/// overtime/deduction evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentLine {
    /// The date the adjustment applies to.
    pub date: NaiveDate,
    /// Additional hours granted for that date.
    pub hours: Decimal,
}

/// An approved summary-level override keyed by work entry type code.
///
/// Unlike adjustments, manual lines are authoritative: a manual line with
/// a given code fully replaces the computed work-entry line for that code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualLine {
    /// The work entry type code, e.g. "OT", "SPCLOT", "MOLOT", "ABSDED".
    pub work_entry_type_code: String,
    /// Days carried by the line (zero for hour-only entries).
    #[serde(default)]
    pub number_of_days: Decimal,
    /// Hours carried by the line.
    pub number_of_hours: Decimal,
}

/// A coded line consumed by the payroll rule engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEntryLine {
    /// Ordering hint for payslip rendering.
    pub sequence: u32,
    /// The work entry type code used by salary rules.
    pub code: String,
    /// Human-readable description.
    pub name: String,
    /// Number of days carried by the line.
    pub number_of_days: Decimal,
    /// Number of hours carried by the line.
    pub number_of_hours: Decimal,
}

/// A data-quality warning raised during reconciliation.
///
/// Warnings never change a day's classification; they flag input that
/// requires manual correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReconcileWarning {
    /// A punch exists on a day whose expected hours are zero due to
    /// leave or a public holiday.
    OverlapViolation {
        /// The employee the punch belongs to.
        employee_id: String,
        /// The leave/holiday date carrying the stray punch.
        date: NaiveDate,
    },
    /// A day expects working hours but the calendar provider supplied no
    /// interval data; worked hours default to zero.
    PartialData {
        /// The employee the day belongs to.
        employee_id: String,
        /// The date with missing interval data.
        date: NaiveDate,
    },
}

/// Lifecycle state of a period summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryState {
    /// The summary may still be regenerated.
    Draft,
    /// The summary has been consumed by a payslip; regeneration over an
    /// overlapping range is forbidden.
    Validated,
}

/// The reconciled summary of one (employee, period) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The employee the period belongs to.
    pub employee_id: String,
    /// Start of the period (inclusive).
    pub date_from: NaiveDate,
    /// End of the period (inclusive).
    pub date_to: NaiveDate,
    /// The policy the period was reconciled under.
    pub policy: Policy,
    /// The per-day records, in chronological order.
    pub daily_records: Vec<DailyRecord>,
    /// Days whose status is neither absent nor unpaid.
    pub worked_days: u32,
    /// Days whose status is absent (always zero under `na` mode).
    pub absent_days: u32,
    /// Total worked plus adjustment hours over the period.
    pub total_worked: Decimal,
    /// Total overtime hours (per-day sum, or the monthly aggregate).
    pub total_overtime: Decimal,
    /// Total deduction hours (per-day sum, or the monthly aggregate).
    pub total_deduction: Decimal,
    /// Approved manual override lines merged into the work-entry output.
    pub manual_lines: Vec<ManualLine>,
    /// Data-quality warnings raised during reconciliation.
    pub warnings: Vec<ReconcileWarning>,
    /// Lifecycle state.
    pub state: SummaryState,
}

/// Work entry type code for regular worked days.
pub const CODE_WORKED: &str = "WORK100";
/// Work entry type code for absent days.
pub const CODE_ABSENT: &str = "ABSENT";
/// Work entry type code for overtime hours.
pub const CODE_OVERTIME: &str = "OT";
/// Work entry type code for absence/deduction hours.
pub const CODE_DEDUCTION: &str = "ABSDED";

fn known_line(code: &str) -> Option<(u32, &'static str)> {
    match code {
        CODE_WORKED => Some((1, "Worked Days")),
        CODE_ABSENT => Some((5, "Absent Days")),
        CODE_OVERTIME => Some((10, "Overtime Hours")),
        CODE_DEDUCTION => Some((15, "Absence/Deduction Hours")),
        _ => None,
    }
}

impl PeriodSummary {
    /// Builds the coded work-entry lines the payroll rule engine consumes.
    ///
    /// Computed lines come from the period totals; a manual line with a
    /// known code replaces the computed figure for that code, and manual
    /// lines with other codes (e.g. "SPCLOT", "MOLOT") are appended.
    pub fn worked_day_lines(&self) -> Vec<WorkEntryLine> {
        let mut lines = vec![WorkEntryLine {
            sequence: 1,
            code: CODE_WORKED.to_string(),
            name: "Worked Days".to_string(),
            number_of_days: Decimal::from(self.worked_days),
            number_of_hours: self.total_worked,
        }];
        if self.absent_days > 0 {
            lines.push(WorkEntryLine {
                sequence: 5,
                code: CODE_ABSENT.to_string(),
                name: "Absent Days".to_string(),
                number_of_days: Decimal::from(self.absent_days),
                number_of_hours: Decimal::ZERO,
            });
        }
        if self.total_overtime > Decimal::ZERO {
            lines.push(WorkEntryLine {
                sequence: 10,
                code: CODE_OVERTIME.to_string(),
                name: "Overtime Hours".to_string(),
                number_of_days: Decimal::ZERO,
                number_of_hours: self.total_overtime,
            });
        }
        if self.total_deduction > Decimal::ZERO {
            lines.push(WorkEntryLine {
                sequence: 15,
                code: CODE_DEDUCTION.to_string(),
                name: "Absence/Deduction Hours".to_string(),
                number_of_days: Decimal::ZERO,
                number_of_hours: self.total_deduction,
            });
        }

        for manual in &self.manual_lines {
            if let Some(existing) = lines
                .iter_mut()
                .find(|l| l.code == manual.work_entry_type_code)
            {
                existing.number_of_days = manual.number_of_days;
                existing.number_of_hours = manual.number_of_hours;
            } else {
                let (sequence, name) = known_line(&manual.work_entry_type_code)
                    .unwrap_or((100, ""));
                lines.push(WorkEntryLine {
                    sequence,
                    code: manual.work_entry_type_code.clone(),
                    name: if name.is_empty() {
                        manual.work_entry_type_code.clone()
                    } else {
                        name.to_string()
                    },
                    number_of_days: manual.number_of_days,
                    number_of_hours: manual.number_of_hours,
                });
            }
        }

        lines.sort_by(|a, b| a.sequence.cmp(&b.sequence).then(a.code.cmp(&b.code)));
        lines
    }
}
