//! Reconciliation logic for the attendance engine.
//!
//! This module contains the logical-day normalizer, the strict and
//! flexible worked-hours strategies, the overtime/deduction evaluator,
//! the status classifier, the period normalizer used for proration, the
//! daily reconciliation calculator, the summary aggregator, and the
//! `Recompute` orchestration with its provider traits.

mod daily;
mod engine;
mod flexible;
mod logical_day;
mod overtime;
mod period;
mod status;
mod strategy;
mod strict;
mod summary;

pub use daily::reconcile_day;
pub use engine::{
    AttendanceProvider, CalendarProvider, InMemoryAttendance, InMemoryCalendar,
    ReconciliationEngine, RecomputeRequest, compute_period,
};
pub use flexible::{FlexibleAggregator, flexible_worked_hours};
pub use logical_day::assign_logical_days;
pub use overtime::evaluate_ot_ded;
pub use period::{days_in_month, prorate, weekday_count};
pub use status::classify_day;
pub use strategy::{NotApplicable, WorkedHoursStrategy, strategy_for};
pub use strict::{StrictMatcher, strict_worked_hours};
pub use summary::build_summary;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Hours between two timestamps as an exact decimal (whole seconds / 3600).
pub(crate) fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    Decimal::new((end - start).num_seconds(), 0) / Decimal::new(3600, 0)
}
