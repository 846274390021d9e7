//! Claimable openings and snapshots
//!
//! An `Opening` is one (posting, slot) pair that can be claimed exactly once
//! per poll cycle. A `Snapshot` is the complete set of openings observed at
//! one point in time; it is owned by the poll loop and replaced wholesale at
//! the end of each cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::posting::JobPosting;
use crate::domain::slot::ShiftSlot;

/// One claimable (posting, slot) pair
///
/// Identity is the derived unit key `"{posting_id}-{slot_id}"`. The key is
/// stable across polls for the same logical opening and is the sole value
/// used for deduplication and set membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opening {
    /// Derived identity, computed once at construction
    unit_key: String,

    /// The posting this opening belongs to
    pub posting: JobPosting,

    /// The shift slot being claimed
    pub slot: ShiftSlot,
}

impl Opening {
    /// Creates an opening from a posting/slot pair, deriving the unit key
    pub fn new(posting: JobPosting, slot: ShiftSlot) -> Self {
        let unit_key = format!("{}-{}", posting.posting_id, slot.slot_id);
        Self {
            unit_key,
            posting,
            slot,
        }
    }

    /// The opening's identity within and across snapshots
    pub fn unit_key(&self) -> &str {
        &self.unit_key
    }
}

/// The appeared/disappeared difference between two consecutive snapshots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotDelta {
    /// Openings present in current but not in previous
    pub appeared: Vec<Opening>,

    /// Openings present in previous but not in current
    pub disappeared: Vec<Opening>,
}

/// Whether a snapshot represents a completed search or a failed one
///
/// A failed posting search yields an empty snapshot tagged `SearchFailed`,
/// which is distinguishable from a genuinely empty result. The poll loop
/// never diffs a failed snapshot against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotStatus {
    /// The posting search succeeded (individual slot searches may still
    /// have failed and contributed zero openings)
    Complete,

    /// The posting search itself failed; the snapshot carries no openings
    SearchFailed,
}

/// The complete set of openings observed at one point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub openings: Vec<Opening>,
    pub taken_at: DateTime<Utc>,
    pub status: SnapshotStatus,
}

impl Snapshot {
    /// Creates a completed snapshot, deduplicating openings by unit key
    ///
    /// If the gateway returns two openings with the same unit key, the last
    /// one wins; the earlier entry is overwritten in place so input order
    /// is otherwise preserved.
    pub fn complete(openings: Vec<Opening>, taken_at: DateTime<Utc>) -> Self {
        let mut index = std::collections::HashMap::new();
        let mut deduped: Vec<Opening> = Vec::with_capacity(openings.len());

        for opening in openings {
            match index.get(opening.unit_key()) {
                Some(&pos) => deduped[pos] = opening,
                None => {
                    index.insert(opening.unit_key().to_string(), deduped.len());
                    deduped.push(opening);
                }
            }
        }

        Self {
            openings: deduped,
            taken_at,
            status: SnapshotStatus::Complete,
        }
    }

    /// Creates the degenerate snapshot for a failed posting search
    pub fn search_failed(taken_at: DateTime<Utc>) -> Self {
        Self {
            openings: Vec::new(),
            taken_at,
            status: SnapshotStatus::SearchFailed,
        }
    }

    /// Returns true when the posting search behind this snapshot failed
    pub fn is_failed(&self) -> bool {
        self.status == SnapshotStatus::SearchFailed
    }

    pub fn len(&self) -> usize {
        self.openings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }
}
