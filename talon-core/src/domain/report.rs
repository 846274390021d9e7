//! Cycle and dispatch reports
//!
//! Reports are the engine's output surface: one `DispatchReport` per
//! dispatch call and one `CycleReport` per completed poll cycle. Downstream
//! logging and booking consumers read these; the engine itself only writes
//! them.

use serde::{Deserialize, Serialize};

use crate::domain::opening::SnapshotDelta;
use crate::domain::outcome::ClaimOutcome;

/// Aggregated result of one dispatch call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Number of accepted claims
    pub accepted_count: usize,

    /// Number of rejected claims
    pub rejected_count: usize,

    /// Total outcomes; always `accepted_count + rejected_count`
    pub total: usize,

    /// Claims per second over the dispatch window; `None` when the window
    /// had zero duration
    pub throughput_per_sec: Option<f64>,

    /// Accepted outcomes in their original relative order
    pub accepted: Vec<ClaimOutcome>,

    /// Rejected outcomes in their original relative order
    pub rejected: Vec<ClaimOutcome>,
}

impl DispatchReport {
    /// The empty report for a cycle that dispatched nothing
    pub fn empty() -> Self {
        Self {
            accepted_count: 0,
            rejected_count: 0,
            total: 0,
            throughput_per_sec: None,
            accepted: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// How a poll cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleStatus {
    /// Snapshot was built and (possibly zero) claims were dispatched
    Completed,

    /// The posting search failed; nothing was diffed or dispatched
    SearchFailed,
}

/// Summary of one full poll cycle
///
/// Emitted once per cycle, even when the cycle produced zero claims. A
/// search-failed cycle is distinguishable from a genuinely empty one via
/// `status`, not by its zero counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleReport {
    pub status: CycleStatus,

    /// Openings observed in the current snapshot
    pub observed: usize,

    /// The raw appeared/disappeared sets for this cycle
    pub delta: SnapshotDelta,

    /// Outcome aggregation for this cycle's dispatch
    pub dispatch: DispatchReport,
}

impl CycleReport {
    /// The degenerate report for a cycle whose posting search failed
    pub fn search_failed() -> Self {
        Self {
            status: CycleStatus::SearchFailed,
            observed: 0,
            delta: SnapshotDelta::default(),
            dispatch: DispatchReport::empty(),
        }
    }
}
