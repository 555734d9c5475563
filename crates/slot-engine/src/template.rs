//! Weekly recurrence template built from the schedule configuration.
//!
//! Each weekday carries an ordered list of `(time of day, area)` entries. The
//! configuration may list a day under its full name (`monday`) and its
//! three-letter abbreviation (`mon`) at the same time; both lists are kept.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::Deserialize;

use crate::error::{Result, SlotError};
use crate::time_of_day::TimeOfDay;

/// Planning horizon used when the configuration does not set `days`.
pub const DEFAULT_PLAN_ADVANCE_DAYS: u32 = 6;

/// Longest planning horizon a configuration may ask for.
pub const MAX_PLAN_ADVANCE_DAYS: u32 = 366;

/// Every weekday in Monday-first order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Raw schedule configuration as read from disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleConfig {
    /// How many days past today the window is kept filled.
    #[serde(default = "default_days")]
    pub days: u32,
    /// Gym the schedule belongs to. Informational only.
    #[serde(default)]
    pub gym: Option<String>,
    /// Weekday name or abbreviation → recurrence entries.
    pub timespec: BTreeMap<String, Vec<TimeSpecEntry>>,
}

fn default_days() -> u32 {
    DEFAULT_PLAN_ADVANCE_DAYS
}

/// One configured slot on a weekday.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeSpecEntry {
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
    pub area: String,
}

impl ScheduleConfig {
    /// Deserialize a JSON configuration document.
    ///
    /// # Errors
    /// Returns `SlotError::Config` when `hour` or `area` is missing from an
    /// entry or any field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A `(time, area)` pair attached to one weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceEntry {
    pub time: TimeOfDay,
    pub area: String,
}

/// Read-only mapping from weekday to its recurrence entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyTemplate {
    days: [Vec<RecurrenceEntry>; 7],
}

impl WeeklyTemplate {
    /// Build the template from a configuration.
    ///
    /// For each weekday the entries under the full name come first, followed
    /// by those under the abbreviation. Keys are matched case-insensitively.
    ///
    /// # Errors
    /// Returns `SlotError::Config` for a key that names no weekday, an entry
    /// whose hour or minute is out of range, or `days` above
    /// [`MAX_PLAN_ADVANCE_DAYS`].
    pub fn load(config: &ScheduleConfig) -> Result<Self> {
        if config.days > MAX_PLAN_ADVANCE_DAYS {
            return Err(SlotError::Config(format!(
                "days must be at most {}, got {}",
                MAX_PLAN_ADVANCE_DAYS, config.days
            )));
        }
        for key in config.timespec.keys() {
            if weekday_for_key(key).is_none() {
                return Err(SlotError::Config(format!("unknown weekday '{}' in timespec", key)));
            }
        }

        let mut template = Self::default();
        for weekday in WEEKDAYS {
            let full = full_name(weekday);
            let short = &full[..3];
            let bucket = &mut template.days[weekday.num_days_from_monday() as usize];

            for key in [full, short] {
                let specs = config
                    .timespec
                    .iter()
                    .filter(|(k, _)| k.eq_ignore_ascii_case(key))
                    .flat_map(|(_, v)| v.iter());
                for spec in specs {
                    let time = TimeOfDay::new(spec.hour, spec.minute).map_err(|_| {
                        SlotError::Config(format!(
                            "{}: time {}:{:02} out of range",
                            key, spec.hour, spec.minute
                        ))
                    })?;
                    bucket.push(RecurrenceEntry {
                        time,
                        area: spec.area.clone(),
                    });
                }
            }
        }
        Ok(template)
    }

    /// Entries for a weekday, in configuration order.
    pub fn entries(&self, weekday: Weekday) -> &[RecurrenceEntry] {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    /// True when no weekday has any entry.
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    /// Total number of entries across the week.
    pub fn len(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }
}

/// Lower-case English name of a weekday.
pub fn full_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

fn weekday_for_key(key: &str) -> Option<Weekday> {
    WEEKDAYS.into_iter().find(|&day| {
        let full = full_name(day);
        key.eq_ignore_ascii_case(full) || key.eq_ignore_ascii_case(&full[..3])
    })
}
