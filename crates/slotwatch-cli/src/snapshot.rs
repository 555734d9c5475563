//! File-backed data source: a JSON snapshot of the booking API.
//!
//! ```json
//! {
//!   "reservations": [{"start_at": "...", "end_at": "...", "reservation_area": {"name": "A"}}],
//!   "slots": [{"slot_start_at": "...", "slot_end_at": "...", "area": "A", "spots": 10, "spots_booked": 4}]
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use slot_engine::records::{available_from_slots, taken_from_reservations};
use slot_engine::{AvailableInterval, ShiftSource, SlotError, TakenInterval};

#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    reservations: Vec<Value>,
    #[serde(default)]
    slots: Vec<Value>,
}

/// Parsed snapshot contents.
#[derive(Debug, Default)]
pub struct Snapshot {
    taken: Vec<TakenInterval>,
    available: Vec<AvailableInterval>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
        let file: SnapshotFile = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;
        Ok(Self {
            taken: taken_from_reservations(&file.reservations).context("Invalid reservation record")?,
            available: available_from_slots(&file.slots, None).context("Invalid slot record")?,
        })
    }
}

impl ShiftSource for Snapshot {
    fn taken(&mut self) -> slot_engine::error::Result<Vec<TakenInterval>> {
        Ok(self.taken.clone())
    }

    fn available(
        &mut self,
        date: NaiveDate,
        area: Option<&str>,
    ) -> slot_engine::error::Result<Vec<AvailableInterval>> {
        Ok(self
            .available
            .iter()
            .filter(|slot| slot.start.date() == date)
            .filter(|slot| match (area, slot.area.as_deref()) {
                (Some(wanted), Some(have)) => wanted.eq_ignore_ascii_case(have),
                _ => true,
            })
            .cloned()
            .collect())
    }
}

/// Re-reads its snapshot file on every cycle, so a file rewritten by another
/// process is picked up by the polling loop.
#[derive(Debug)]
pub struct SnapshotSource {
    path: PathBuf,
    current: Option<Snapshot>,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: None,
        }
    }
}

impl ShiftSource for SnapshotSource {
    fn taken(&mut self) -> slot_engine::error::Result<Vec<TakenInterval>> {
        // A cycle always starts with `taken`, so reload here.
        let mut snapshot = Snapshot::load(&self.path).map_err(|e| SlotError::Parse(format!("{:#}", e)))?;
        let taken = snapshot.taken()?;
        self.current = Some(snapshot);
        Ok(taken)
    }

    fn available(
        &mut self,
        date: NaiveDate,
        area: Option<&str>,
    ) -> slot_engine::error::Result<Vec<AvailableInterval>> {
        match self.current.as_mut() {
            Some(snapshot) => snapshot.available(date, area),
            None => Err(SlotError::Parse(format!(
                "snapshot {} not loaded",
                self.path.display()
            ))),
        }
    }
}
