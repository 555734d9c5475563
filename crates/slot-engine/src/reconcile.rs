//! Reconciliation of occurrences against data-source intervals.
//!
//! Two data shapes are supported. The API shape supplies the gym's current
//! reservations plus the open (not fully booked) shifts for a day and area.
//! The UI shape supplies, for one day and area, shift time labels and booking
//! button labels as two lists paired by position.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::interval::{DateTimeInterval, ShiftTime};
use crate::occurrence::{Occurrence, ShiftState};

/// A reservation the user already holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakenInterval {
    pub area: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TakenInterval {
    pub fn interval(&self) -> DateTimeInterval {
        DateTimeInterval::new(self.start, self.end)
    }
}

/// A shift with open spots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableInterval {
    pub area: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl AvailableInterval {
    pub fn interval(&self) -> DateTimeInterval {
        DateTimeInterval::new(self.start, self.end)
    }
}

/// Decide an occurrence's state from API-shaped data. First match wins:
///
/// 1. a taken interval contains the occurrence and its area matches (or the
///    occurrence has no area) → `Taken`
/// 2. an available interval contains the occurrence → `Available`
/// 3. otherwise → `Full`
///
/// `available` must already be narrowed to the occurrence's date and area.
/// Areas compare case-insensitively.
pub fn decide_state(
    occurrence: &Occurrence,
    taken: &[TakenInterval],
    available: &[AvailableInterval],
) -> ShiftState {
    if find_taken(occurrence, taken).is_some() {
        ShiftState::Taken
    } else if available
        .iter()
        .any(|slot| slot.interval().contains(&occurrence.datetime()))
    {
        ShiftState::Available
    } else {
        ShiftState::Full
    }
}

/// Apply [`decide_state`] to the occurrence. When a reservation matches an
/// occurrence without an area, the reservation's area is adopted.
pub fn reconcile(
    occurrence: &mut Occurrence,
    taken: &[TakenInterval],
    available: &[AvailableInterval],
) -> ShiftState {
    if let Some(reservation) = find_taken(occurrence, taken) {
        let area = reservation.area.clone();
        occurrence.adopt_area(&area);
        occurrence.set_state(ShiftState::Taken);
        return ShiftState::Taken;
    }
    let state = decide_state(occurrence, &[], available);
    occurrence.set_state(state);
    state
}

fn find_taken<'a>(occurrence: &Occurrence, taken: &'a [TakenInterval]) -> Option<&'a TakenInterval> {
    taken.iter().find(|reservation| {
        reservation.interval().contains(&occurrence.datetime())
            && occurrence
                .area()
                .is_none_or(|area| area.eq_ignore_ascii_case(&reservation.area))
    })
}

/// Reconcile against UI-shaped data: shift time spans and the booking labels
/// shown next to them.
///
/// The two lists are paired by position. A length mismatch is logged and the
/// extra items on the longer side are ignored. The first shift containing the
/// occurrence's time of day decides the state; if none does, the state becomes
/// `Unknown`.
pub fn reconcile_labelled(
    occurrence: &mut Occurrence,
    shifts: &[ShiftTime],
    states: &[ShiftState],
) -> ShiftState {
    if shifts.len() != states.len() {
        warn!(
            shifts = shifts.len(),
            states = states.len(),
            datetime = %occurrence.datetime(),
            "unexpected unequal amount of shifts and booking states"
        );
    }

    let state = shifts
        .iter()
        .zip(states)
        .find(|(shift, _)| shift.contains_time_of(&occurrence.datetime()))
        .map(|(_, state)| *state)
        .unwrap_or(ShiftState::Unknown);
    occurrence.set_state(state);
    state
}
