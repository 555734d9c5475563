//! Concrete dated slots and their booking state.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Booking state of a slot as last observed at the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftState {
    /// A shift covers the slot and has open spots.
    Available,
    /// A shift covers the slot but cannot be booked.
    Full,
    /// The slot is already reserved.
    Taken,
    /// Not yet observed.
    #[default]
    Unknown,
}

impl ShiftState {
    /// Map a booking button label from the web UI to a state.
    ///
    /// Unrecognized labels map to `Unknown`.
    pub fn from_button_label(label: &str) -> Self {
        match label.trim() {
            "BOOK" => ShiftState::Available,
            "FULLY BOOKED" => ShiftState::Full,
            "CANCEL BOOKING" => ShiftState::Taken,
            other => {
                warn!(label = other, "unrecognized booking label");
                ShiftState::Unknown
            }
        }
    }
}

impl fmt::Display for ShiftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShiftState::Available => "AVAILABLE",
            ShiftState::Full => "FULL",
            ShiftState::Taken => "TAKEN",
            ShiftState::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// One dated instance of a recurrence entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    datetime: NaiveDateTime,
    area: Option<String>,
    state: ShiftState,
    previous: ShiftState,
    dirty: bool,
}

impl Occurrence {
    pub fn new(datetime: NaiveDateTime, area: Option<String>) -> Self {
        Self {
            datetime,
            area,
            state: ShiftState::Unknown,
            previous: ShiftState::Unknown,
            dirty: false,
        }
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    pub fn area(&self) -> Option<&str> {
        self.area.as_deref()
    }

    pub fn state(&self) -> ShiftState {
        self.state
    }

    /// The state held before the most recent change.
    pub fn previous_state(&self) -> ShiftState {
        self.previous
    }

    /// True when the state changed since the last [`mark_processed`](Self::mark_processed).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Assign a new state. Only an actual change sets the dirty flag;
    /// re-assigning the current state is a no-op.
    pub fn set_state(&mut self, state: ShiftState) {
        if self.state == state {
            return;
        }
        debug!(
            datetime = %self.datetime,
            area = self.area.as_deref().unwrap_or("-"),
            old = %self.state,
            new = %state,
            "slot state changed"
        );
        self.previous = self.state;
        self.state = state;
        self.dirty = true;
    }

    /// Acknowledge the last change.
    pub fn mark_processed(&mut self) {
        self.dirty = false;
    }

    /// Adopt an area reported by the data source when none was configured.
    pub(crate) fn adopt_area(&mut self, area: &str) {
        if self.area.is_none() {
            self.area = Some(area.to_string());
        }
    }

    /// Snapshot of the latest transition for reporting.
    pub fn change(&self) -> StateChange {
        StateChange {
            datetime: self.datetime,
            area: self.area.clone(),
            old_state: self.previous,
            new_state: self.state,
        }
    }
}

/// A state transition emitted for notification sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub datetime: NaiveDateTime,
    pub area: Option<String>,
    pub old_state: ShiftState,
    pub new_state: ShiftState,
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}: {} -> {}",
            self.area.as_deref().unwrap_or("(any area)"),
            self.datetime.format("%a %Y-%m-%d %H:%M"),
            self.old_state,
            self.new_state
        )
    }
}
