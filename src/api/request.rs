//! Request types for the attendance engine API.
//!
//! This module defines the JSON request structures for the `/reconcile`
//! endpoint.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AdjustmentLine, DaySpec, ManualLine, Policy, Punch, WorkInterval};

/// Request body for the `/reconcile` endpoint.
///
/// Carries the calendar days, punches and approved lines for one
/// employee and period. The governing policy is either given inline or
/// named via `policy_profile`; an inline policy takes precedence. With
/// neither, the server's default profile applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileRequest {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// First day of the period (inclusive).
    pub date_from: NaiveDate,
    /// Last day of the period (inclusive).
    pub date_to: NaiveDate,
    /// Inline policy, overriding any named profile.
    #[serde(default)]
    pub policy: Option<Policy>,
    /// Name of a configured policy profile.
    #[serde(default)]
    pub policy_profile: Option<String>,
    /// The calendar days covering the period.
    pub days: Vec<DaySpecRequest>,
    /// Raw attendance punches.
    #[serde(default)]
    pub punches: Vec<PunchRequest>,
    /// Approved per-day adjustment lines.
    #[serde(default)]
    pub adjustments: Vec<AdjustmentLineRequest>,
    /// Approved summary-level manual lines.
    #[serde(default)]
    pub manual_lines: Vec<ManualLineRequest>,
}

/// One calendar day in a reconcile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySpecRequest {
    /// The calendar date.
    pub date: NaiveDate,
    /// Hours the calendar expects to be worked.
    pub expected_hours: Decimal,
    /// Scheduled work intervals of the day.
    #[serde(default)]
    pub intervals: Vec<WorkIntervalRequest>,
    /// Whether the day is a public holiday.
    #[serde(default)]
    pub is_holiday: bool,
    /// Reference of an approved leave covering the day.
    #[serde(default)]
    pub leave_ref: Option<String>,
    /// Whether the covering leave is unpaid.
    #[serde(default)]
    pub leave_is_unpaid: bool,
}

/// One scheduled work interval in a reconcile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkIntervalRequest {
    /// Interval start.
    pub start: NaiveDateTime,
    /// Interval end.
    pub end: NaiveDateTime,
}

/// One attendance punch in a reconcile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRequest {
    /// Check-in timestamp.
    pub check_in: NaiveDateTime,
    /// Check-out timestamp.
    pub check_out: NaiveDateTime,
}

/// One approved adjustment line in a reconcile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentLineRequest {
    /// Day the adjustment applies to.
    pub date: NaiveDate,
    /// Hours added to the day's worked total.
    pub hours: Decimal,
}

/// One approved manual line in a reconcile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualLineRequest {
    /// Work entry type code the line overrides (e.g. "OT").
    pub work_entry_type_code: String,
    /// Day count carried by the line.
    #[serde(default)]
    pub number_of_days: Decimal,
    /// Hour figure carried by the line.
    pub number_of_hours: Decimal,
}

impl From<WorkIntervalRequest> for WorkInterval {
    fn from(req: WorkIntervalRequest) -> Self {
        Self {
            start: req.start,
            end: req.end,
        }
    }
}

impl From<DaySpecRequest> for DaySpec {
    fn from(req: DaySpecRequest) -> Self {
        Self {
            date: req.date,
            expected_hours: req.expected_hours,
            intervals: req.intervals.into_iter().map(Into::into).collect(),
            is_holiday: req.is_holiday,
            leave_ref: req.leave_ref,
            leave_is_unpaid: req.leave_is_unpaid,
        }
    }
}

impl From<PunchRequest> for Punch {
    fn from(req: PunchRequest) -> Self {
        Self {
            check_in: req.check_in,
            check_out: req.check_out,
        }
    }
}

impl From<AdjustmentLineRequest> for AdjustmentLine {
    fn from(req: AdjustmentLineRequest) -> Self {
        Self {
            date: req.date,
            hours: req.hours,
        }
    }
}

impl From<ManualLineRequest> for ManualLine {
    fn from(req: ManualLineRequest) -> Self {
        Self {
            work_entry_type_code: req.work_entry_type_code,
            number_of_days: req.number_of_days,
            number_of_hours: req.number_of_hours,
        }
    }
}
