//! Attendance reconciliation engine for payroll.
//!
//! This crate reconciles raw check-in/check-out punches against
//! calendar-defined working intervals and produces normalized hour and day
//! figures (worked, overtime, deduction, absence) that a payroll rule
//! engine consumes as coded work-entry lines.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod reconcile;
