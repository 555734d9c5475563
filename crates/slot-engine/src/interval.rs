//! Half-open time spans and the containment check used by reconciliation.
//!
//! An interval is `[start, end)`: the start instant is inside, the end instant
//! is not. Spans are never normalized across midnight, so an interval whose end
//! is before its start contains nothing.

use std::fmt;

use chrono::NaiveDateTime;

use crate::error::{Result, SlotError};
use crate::time_of_day::TimeOfDay;

/// Separator the booking UI places between a shift's start and end times.
pub const SHIFT_LABEL_SEPARATOR: char = '—';

/// A span between two instants of the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    pub start: T,
    pub end: T,
}

/// Interval between two calendar instants, as supplied by a data source.
pub type DateTimeInterval = Interval<NaiveDateTime>;

/// Interval between two wall-clock times on an implied day.
pub type ShiftTime = Interval<TimeOfDay>;

impl<T: Ord> Interval<T> {
    /// Build an interval. `start < end` is the caller's responsibility.
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    /// True when `start <= instant < end`.
    pub fn contains(&self, instant: &T) -> bool {
        self.start <= *instant && *instant < self.end
    }

    /// True when `end <= start`; such an interval contains no instant.
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }
}

impl Interval<TimeOfDay> {
    /// Parse both endpoints as 24-hour `"HH:MM"` text.
    ///
    /// # Errors
    /// Returns `SlotError::Parse` if either endpoint fails to parse.
    pub fn from_strings(raw_start: &str, raw_end: &str) -> Result<Self> {
        Ok(Self::new(TimeOfDay::parse(raw_start)?, TimeOfDay::parse(raw_end)?))
    }

    /// Parse a shift label as rendered by the booking UI, e.g.
    /// `"18:00 — 19:30\nBouldering"`. Only the first line is read.
    pub fn from_shift_label(label: &str) -> Result<Self> {
        let first_line = label.lines().next().unwrap_or_default();
        let (start, end) = first_line.split_once(SHIFT_LABEL_SEPARATOR).ok_or_else(|| {
            SlotError::Parse(format!(
                "missing '{}' in shift label '{}'",
                SHIFT_LABEL_SEPARATOR, first_line
            ))
        })?;
        Self::from_strings(start, end)
    }

    /// Test a calendar instant against this wall-clock span, ignoring its date.
    pub fn contains_time_of(&self, instant: &NaiveDateTime) -> bool {
        self.contains(&TimeOfDay::from(instant.time()))
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
