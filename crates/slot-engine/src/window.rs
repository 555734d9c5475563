//! The rolling schedule window.
//!
//! Expands the weekly template into dated occurrences from today through the
//! planning horizon, and drops occurrences once their instant has passed. The
//! window advances one calendar day at a time so a long pause between calls
//! never leaves a date without its occurrences.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::occurrence::{Occurrence, ShiftState, StateChange};
use crate::template::{WeeklyTemplate, MAX_PLAN_ADVANCE_DAYS};

/// Owned window state for one schedule. Not thread-safe; callers that share
/// it across threads wrap it in a lock.
#[derive(Debug, Clone)]
pub struct ScheduleWindow {
    template: WeeklyTemplate,
    plan_advance_days: u32,
    last_generated_date: Option<NaiveDate>,
    occurrences: Vec<Occurrence>,
}

impl ScheduleWindow {
    /// `plan_advance_days` is capped at [`MAX_PLAN_ADVANCE_DAYS`].
    pub fn new(template: WeeklyTemplate, plan_advance_days: u32) -> Self {
        Self {
            template,
            plan_advance_days: plan_advance_days.min(MAX_PLAN_ADVANCE_DAYS),
            last_generated_date: None,
            occurrences: Vec::new(),
        }
    }

    pub fn plan_advance_days(&self) -> u32 {
        self.plan_advance_days
    }

    /// Most recent date occurrences were generated for, `None` before the
    /// first [`advance`](Self::advance).
    pub fn last_generated_date(&self) -> Option<NaiveDate> {
        self.last_generated_date
    }

    /// Prune expired occurrences, then generate up to the planning horizon.
    ///
    /// Calling this again with the same or a later `now` never duplicates an
    /// occurrence. Generation starts the day before the first `now` and steps
    /// one day at a time while `last_generated_date <= now + plan_advance_days`.
    /// Occurrences that would already lie before `now` are not created.
    pub fn advance(&mut self, now: NaiveDateTime) {
        let before = self.occurrences.len();
        self.occurrences.retain(|occ| occ.datetime() >= now);
        let pruned = before - self.occurrences.len();

        let target = now
            .checked_add_signed(Duration::days(i64::from(self.plan_advance_days)))
            .map_or(NaiveDate::MAX, |horizon| horizon.date());
        let mut last = match self.last_generated_date {
            Some(date) => date,
            None => now.date().pred_opt().unwrap_or(now.date()),
        };

        let mut generated = 0;
        while last <= target {
            let Some(next) = last.succ_opt() else {
                break;
            };
            last = next;
            let mut day: Vec<Occurrence> = self
                .template
                .entries(last.weekday())
                .iter()
                .map(|entry| {
                    Occurrence::new(last.and_time(entry.time.to_naive_time()), Some(entry.area.clone()))
                })
                .filter(|occ| occ.datetime() >= now)
                .collect();
            day.sort_by_key(Occurrence::datetime);
            generated += day.len();
            self.occurrences.extend(day);
        }
        self.last_generated_date = Some(last);

        if pruned > 0 || generated > 0 {
            debug!(%now, pruned, generated, through = %last, "schedule window advanced");
        }
    }

    /// Occurrences still open for reconciliation: everything not `Taken`,
    /// oldest first.
    pub fn list_active(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences
            .iter()
            .filter(|occ| occ.state() != ShiftState::Taken)
    }

    /// Mutable form of [`list_active`](Self::list_active).
    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut Occurrence> {
        self.occurrences
            .iter_mut()
            .filter(|occ| occ.state() != ShiftState::Taken)
    }

    /// Every live occurrence, including taken ones, oldest first.
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// Report every changed occurrence and mark it processed.
    pub fn drain_changes(&mut self) -> Vec<StateChange> {
        self.occurrences
            .iter_mut()
            .filter(|occ| occ.is_dirty())
            .map(|occ| {
                let change = occ.change();
                occ.mark_processed();
                change
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}
