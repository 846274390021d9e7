//! Shift slot domain model

use serde::{Deserialize, Serialize};

/// A shift slot (schedule) belonging to one job posting
///
/// Slots share the lifecycle of their posting: produced fresh by each slot
/// search, immutable once read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftSlot {
    /// Gateway identifier, unique within the scope of its posting
    pub slot_id: String,

    /// Back-reference to the owning posting (non-owning)
    pub posting_id: String,

    /// Remaining capacity reported by the gateway
    pub open_count: u32,

    /// First day on site
    pub start_date: Option<String>,

    /// Base pay for the slot
    pub base_pay: Option<f64>,

    /// Scheduled hours per week
    pub hours_per_week: Option<f64>,
}

impl ShiftSlot {
    /// Returns true when the slot carries a usable identifier
    pub fn has_id(&self) -> bool {
        !self.slot_id.is_empty()
    }
}
