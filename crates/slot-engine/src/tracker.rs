//! One reconciliation cycle over a schedule window.
//!
//! The data source and the notification sink are traits so hosts can plug in
//! an HTTP client, a browser driver, a snapshot file, or a test double. A cycle
//! never retries: whatever cannot be fetched this time is left as it was.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::error::Result;
use crate::occurrence::StateChange;
use crate::reconcile::{self, AvailableInterval, TakenInterval};
use crate::window::ScheduleWindow;

/// Supplies interval data for reconciliation.
pub trait ShiftSource {
    /// The gym's current reservations, fetched once per cycle.
    fn taken(&mut self) -> Result<Vec<TakenInterval>>;

    /// Open, not fully booked shifts on `date` for `area`.
    fn available(&mut self, date: NaiveDate, area: Option<&str>) -> Result<Vec<AvailableInterval>>;
}

/// Receives state transitions.
pub trait ChangeSink {
    fn notify(&mut self, change: &StateChange);
}

impl ChangeSink for Vec<StateChange> {
    fn notify(&mut self, change: &StateChange) {
        self.push(change.clone());
    }
}

/// What a cycle did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Occurrences whose state was recomputed.
    pub checked: usize,
    /// Occurrences left untouched because their data could not be fetched.
    pub skipped: usize,
    /// Transitions forwarded to the sink.
    pub changed: usize,
}

/// Advance the window to `now`, reconcile every active occurrence, and forward
/// the resulting transitions to `sink`.
///
/// If the reservation list cannot be fetched, the whole cycle is skipped after
/// the window advance. A failed per-day fetch skips just that occurrence.
pub fn run_cycle<S, K>(
    window: &mut ScheduleWindow,
    source: &mut S,
    sink: &mut K,
    now: NaiveDateTime,
) -> CycleReport
where
    S: ShiftSource + ?Sized,
    K: ChangeSink + ?Sized,
{
    window.advance(now);
    let mut report = CycleReport::default();

    let taken = match source.taken() {
        Ok(taken) => taken,
        Err(err) => {
            report.skipped = window.list_active().count();
            warn!(error = %err, skipped = report.skipped, "could not fetch reservations, skipping cycle");
            return report;
        }
    };

    for occurrence in window.active_mut() {
        let date = occurrence.datetime().date();
        match source.available(date, occurrence.area()) {
            Ok(available) => {
                reconcile::reconcile(occurrence, &taken, &available);
                report.checked += 1;
            }
            Err(err) => {
                warn!(
                    error = %err,
                    datetime = %occurrence.datetime(),
                    area = occurrence.area().unwrap_or("-"),
                    "could not fetch shifts, occurrence skipped"
                );
                report.skipped += 1;
            }
        }
    }

    for change in window.drain_changes() {
        sink.notify(&change);
        report.changed += 1;
    }
    debug!(?report, "reconciliation cycle finished");
    report
}
