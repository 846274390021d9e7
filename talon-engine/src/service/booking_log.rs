//! Booking log service
//!
//! Records accepted claims durably. The engine treats this as append-only:
//! one record per accepted claim, written during the reporting phase of the
//! cycle that produced it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use talon_core::domain::opening::Opening;

/// One accepted claim, as persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub unit_key: String,
    pub posting_id: String,
    pub slot_id: String,
    pub title: Option<String>,
    pub city: Option<String>,
    pub claimant_id: String,
    pub booked_at: DateTime<Utc>,
}

impl BookingRecord {
    /// Builds a record for an opening that was just claimed
    pub fn for_opening(opening: &Opening, claimant_id: &str) -> Self {
        Self {
            unit_key: opening.unit_key().to_string(),
            posting_id: opening.posting.posting_id.clone(),
            slot_id: opening.slot.slot_id.clone(),
            title: opening.posting.title.clone(),
            city: opening.posting.city.clone(),
            claimant_id: claimant_id.to_string(),
            booked_at: Utc::now(),
        }
    }
}

/// Service for persisting accepted claims
pub trait BookingLog: Send + Sync {
    /// Appends one booking record
    fn record(&self, record: &BookingRecord) -> Result<()>;
}

/// JSON-lines implementation of BookingLog
///
/// Appends one JSON object per line to a file, creating it on first write.
/// A write failure is the caller's to log; it must not fail the cycle.
pub struct JsonlBookingLog {
    path: PathBuf,
}

impl JsonlBookingLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl BookingLog for JsonlBookingLog {
    fn record(&self, record: &BookingRecord) -> Result<()> {
        let line = serde_json::to_string(record).context("Failed to serialize booking record")?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open booking log {}", self.path.display()))?;

        writeln!(file, "{}", line)
            .with_context(|| format!("Failed to append to booking log {}", self.path.display()))
    }
}

/// In-memory implementation of BookingLog for tests
#[derive(Default)]
pub struct InMemoryBookingLog {
    records: Mutex<Vec<BookingRecord>>,
}

impl InMemoryBookingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records written so far
    pub fn records(&self) -> Vec<BookingRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl BookingLog for InMemoryBookingLog {
    fn record(&self, record: &BookingRecord) -> Result<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::opening;

    #[test]
    fn test_jsonl_log_appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.jsonl");
        let log = JsonlBookingLog::new(path.clone());

        let first = BookingRecord::for_opening(&opening("P1", "C1"), "candidate-001");
        let second = BookingRecord::for_opening(&opening("P2", "C1"), "candidate-001");
        log.record(&first).unwrap();
        log.record(&second).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: BookingRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.unit_key, "P1-C1");
        assert_eq!(parsed.claimant_id, "candidate-001");
    }

    #[test]
    fn test_in_memory_log_collects_records() {
        let log = InMemoryBookingLog::new();
        log.record(&BookingRecord::for_opening(&opening("P1", "C1"), "x"))
            .unwrap();
        assert_eq!(log.records().len(), 1);
    }
}
