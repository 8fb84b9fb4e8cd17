//! Core data models for the attendance reconciliation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calendar;
mod policy;
mod punch;
mod summary;

pub use calendar::{DaySpec, WorkInterval};
pub use policy::{AttendanceMode, CalcCycle, DaysInMonthPolicy, Policy};
pub use punch::{AttendanceDay, Punch};
pub use summary::{
    AdjustmentLine, DailyRecord, DayStatus, ManualLine, PeriodSummary, ReconcileWarning,
    SummaryState, WorkEntryLine,
};
