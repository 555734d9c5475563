//! Normalization of reservation and slot records from the booking API.
//!
//! Records are JSON objects. Reservations carry `start_at`/`end_at`, slots
//! carry `slot_start_at`/`slot_end_at`; either may name its area under
//! `reservation_area.name`. Timestamps come with fractional seconds and a UTC
//! offset, both of which are discarded: all instants are naive local time.

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::error::{Result, SlotError};
use crate::reconcile::{AvailableInterval, TakenInterval};

const API_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse an API timestamp such as `2024-01-01T18:00:00.000+01:00`.
///
/// Everything from the first `.` is dropped. Without a fraction, a trailing
/// `Z` or `±HH:MM` offset is dropped instead.
pub fn parse_api_datetime(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    let bare = match trimmed.split_once('.') {
        Some((head, _)) => head,
        None => strip_offset(trimmed),
    };
    NaiveDateTime::parse_from_str(bare, API_DATETIME_FORMAT)
        .map_err(|e| SlotError::Parse(format!("invalid timestamp '{}': {}", trimmed, e)))
}

fn strip_offset(input: &str) -> &str {
    if let Some(head) = input.strip_suffix('Z') {
        return head;
    }
    // `YYYY-MM-DDTHH:MM:SS` is 19 bytes; anything after that is an offset.
    match input.get(19..) {
        Some(rest) if rest.starts_with(['+', '-']) => &input[..19],
        _ => input,
    }
}

/// A reservation or slot record reduced to its span and area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftRecord {
    pub area: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ShiftRecord {
    /// Read one record. `fallback_area` is used when the record names no area.
    ///
    /// # Errors
    /// Returns `SlotError::Parse` when the record lacks a start or end
    /// timestamp or a timestamp does not parse.
    pub fn from_value(record: &Value, fallback_area: Option<&str>) -> Result<Self> {
        let start = timestamp(record, &["start_at", "slot_start_at"])?;
        let end = timestamp(record, &["end_at", "slot_end_at"])?;
        let area = record
            .pointer("/reservation_area/name")
            .or_else(|| record.get("area"))
            .and_then(Value::as_str)
            .or(fallback_area)
            .map(str::to_string);
        Ok(Self { area, start, end })
    }

    /// True when the record reports both counters and every spot is booked.
    pub fn is_fully_booked(record: &Value) -> bool {
        match (
            record.get("spots").and_then(Value::as_i64),
            record.get("spots_booked").and_then(Value::as_i64),
        ) {
            (Some(spots), Some(booked)) => booked >= spots,
            _ => false,
        }
    }
}

fn timestamp(record: &Value, keys: &[&str]) -> Result<NaiveDateTime> {
    let raw = keys
        .iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str))
        .ok_or_else(|| SlotError::Parse(format!("record has none of {:?}", keys)))?;
    parse_api_datetime(raw)
}

/// Convert reservation records into taken intervals. Records without an area
/// get an empty one, which matches only occurrences without an area.
pub fn taken_from_reservations(records: &[Value]) -> Result<Vec<TakenInterval>> {
    records
        .iter()
        .map(|record| {
            let parsed = ShiftRecord::from_value(record, None)?;
            Ok(TakenInterval {
                area: parsed.area.unwrap_or_default(),
                start: parsed.start,
                end: parsed.end,
            })
        })
        .collect()
}

/// Convert slot records into available intervals, dropping fully booked ones.
pub fn available_from_slots(records: &[Value], fallback_area: Option<&str>) -> Result<Vec<AvailableInterval>> {
    records
        .iter()
        .filter(|record| !ShiftRecord::is_fully_booked(record))
        .map(|record| {
            let parsed = ShiftRecord::from_value(record, fallback_area)?;
            Ok(AvailableInterval {
                area: parsed.area,
                start: parsed.start,
                end: parsed.end,
            })
        })
        .collect()
}
