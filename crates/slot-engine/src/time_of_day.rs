//! Wall-clock time of day with minute resolution.
//!
//! The primary input path is 24-hour `"HH:MM"` text. The 12-hour constructors
//! exist for data sources that still render am/pm times.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use crate::error::{Result, SlotError};

/// An `(hour, minute)` pair, ordered by hour then minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    /// Build a time of day, rejecting `hour >= 24` or `minute >= 60`.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(SlotError::InvalidArgument(format!(
                "time of day out of range: {}:{:02}",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// `self <= other`.
    pub fn is_before_or_equal(&self, other: &Self) -> bool {
        self <= other
    }

    /// `self > other`.
    pub fn is_strictly_after(&self, other: &Self) -> bool {
        self > other
    }

    /// Parse 24-hour `"HH:MM"` text. Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// Returns `SlotError::Parse` when the separator is missing or either
    /// field is not a number in range.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let (hour, minute) = trimmed
            .split_once(':')
            .ok_or_else(|| SlotError::Parse(format!("missing ':' in time '{}'", trimmed)))?;
        let hour = parse_field(hour, trimmed)?;
        let minute = parse_field(minute, trimmed)?;
        Self::new(hour, minute).map_err(|_| SlotError::Parse(format!("time out of range: '{}'", trimmed)))
    }

    /// Convert a 12-hour clock reading to 24-hour form.
    ///
    /// `pm` adds twelve hours unless the hour is 12. Exactly `12:00 am` maps
    /// to `23:59`, not `00:00`. Every other `am` reading passes through
    /// unchanged.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidArgument` when `meridiem` is not `am` or
    /// `pm` (case-insensitive), the hour is above 12, or the minute is out
    /// of range.
    pub fn from_12h(hour: u32, minute: u32, meridiem: &str) -> Result<Self> {
        if hour > 12 {
            return Err(SlotError::InvalidArgument(format!(
                "12-hour clock hour out of range: {}",
                hour
            )));
        }
        match meridiem.to_ascii_lowercase().as_str() {
            "am" => {
                if hour == 12 && minute == 0 {
                    Self::new(23, 59)
                } else {
                    Self::new(hour, minute)
                }
            }
            "pm" => {
                if hour != 12 {
                    Self::new(hour + 12, minute)
                } else {
                    Self::new(hour, minute)
                }
            }
            other => Err(SlotError::InvalidArgument(format!(
                "invalid AM/PM string: '{}'",
                other
            ))),
        }
    }

    /// Parse a 12-hour reading such as `"7:30pm"` or `" 12:00 AM "`.
    ///
    /// The last two characters are the meridiem; the rest is `H:MM`.
    pub fn parse_12h(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.len() < 2 || !trimmed.is_char_boundary(trimmed.len() - 2) {
            return Err(SlotError::Parse(format!("missing meridiem in '{}'", trimmed)));
        }
        let (clock, meridiem) = trimmed.split_at(trimmed.len() - 2);
        let clock = clock.trim();
        let (hour, minute) = clock
            .split_once(':')
            .ok_or_else(|| SlotError::Parse(format!("missing ':' in time '{}'", trimmed)))?;
        Self::from_12h(parse_field(hour, trimmed)?, parse_field(minute, trimmed)?, meridiem)
    }

    /// The same time as a `NaiveTime` at second zero.
    pub fn to_naive_time(self) -> NaiveTime {
        // Range is enforced by every constructor.
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

fn parse_field(field: &str, whole: &str) -> Result<u32> {
    let digits = field.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SlotError::Parse(format!(
            "non-numeric field '{}' in time '{}'",
            field, whole
        )));
    }
    digits
        .parse::<u32>()
        .map_err(|_| SlotError::Parse(format!("field '{}' out of range in time '{}'", field, whole)))
}

/// Truncates seconds: `18:00:59` becomes `18:00`.
impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
