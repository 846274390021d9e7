//! Claim outcome domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one claim attempt
///
/// Outcomes are created by the dispatcher, one per opening, and never
/// mutated afterwards. Transport faults, timeouts, API rejections and task
/// panics all collapse into the single `Rejected` variant so the aggregator
/// has one uniform input shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimOutcome {
    /// Unit key of the opening this outcome belongs to
    pub unit_key: String,

    /// Whether the claim was accepted
    pub status: ClaimStatus,

    /// When the attempt finished
    pub at: DateTime<Utc>,
}

/// Terminal status of a claim attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// The gateway accepted the claim
    Accepted,

    /// The claim failed; the reason covers rejections, transport faults
    /// and per-call timeouts alike
    Rejected { reason: String },
}

impl ClaimOutcome {
    /// Creates an accepted outcome stamped with the current time
    pub fn accepted(unit_key: impl Into<String>) -> Self {
        Self {
            unit_key: unit_key.into(),
            status: ClaimStatus::Accepted,
            at: Utc::now(),
        }
    }

    /// Creates a rejected outcome stamped with the current time
    pub fn rejected(unit_key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            unit_key: unit_key.into(),
            status: ClaimStatus::Rejected {
                reason: reason.into(),
            },
            at: Utc::now(),
        }
    }

    /// Returns true when the claim was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == ClaimStatus::Accepted
    }
}
