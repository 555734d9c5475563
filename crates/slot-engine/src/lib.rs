//! # slot-engine
//!
//! Tracks recurring weekly time slots (e.g. gym-class reservations) against a
//! remote booking system and surfaces only the slots whose state changed.
//!
//! A [`WeeklyTemplate`] is built once from configuration. A [`ScheduleWindow`]
//! expands it into dated [`Occurrence`]s from today through a planning horizon,
//! and each cycle reconciles those occurrences against interval data supplied by
//! a [`ShiftSource`]. The engine does no I/O of its own.
//!
//! ## Modules
//!
//! - [`time_of_day`] — `(hour, minute)` values, 24-hour and legacy 12-hour parsing
//! - [`interval`] — half-open spans and containment
//! - [`template`] — schedule configuration → weekly recurrence template
//! - [`occurrence`] — dated slots, states, dirty-flag change tracking
//! - [`window`] — the rolling generator and pruner
//! - [`reconcile`] — state decision from taken/available intervals
//! - [`records`] — booking API records → intervals
//! - [`tracker`] — one full reconciliation cycle with source/sink traits
//! - [`error`] — Error types

pub mod error;
pub mod interval;
pub mod occurrence;
pub mod reconcile;
pub mod records;
pub mod template;
pub mod time_of_day;
pub mod tracker;
pub mod window;

pub use error::SlotError;
pub use interval::{DateTimeInterval, Interval, ShiftTime};
pub use occurrence::{Occurrence, ShiftState, StateChange};
pub use reconcile::{decide_state, reconcile, reconcile_labelled, AvailableInterval, TakenInterval};
pub use template::{RecurrenceEntry, ScheduleConfig, WeeklyTemplate};
pub use time_of_day::TimeOfDay;
pub use tracker::{run_cycle, ChangeSink, CycleReport, ShiftSource};
pub use window::ScheduleWindow;
