//! Job posting domain model
//!
//! Represents one job card returned by the posting search. Postings are
//! re-read fresh on every poll cycle and never persisted beyond the snapshot
//! they belong to.

use serde::{Deserialize, Serialize};

/// A job posting as returned by the posting search
///
/// The gateway occasionally returns cards with a missing identifier; those
/// are carried with an empty `posting_id` and skipped by the snapshot
/// builder, since a posting without an id cannot be claimed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    /// Gateway identifier, unique within one search result
    pub posting_id: String,

    /// Display title of the posting
    pub title: Option<String>,

    /// City the posting is located in
    pub city: Option<String>,

    /// State or province
    pub state: Option<String>,

    /// Postal code
    pub postal_code: Option<String>,

    /// Employment type tag (e.g. "FULL_TIME")
    pub employment_type: Option<String>,
}

impl JobPosting {
    /// Returns true when the posting carries a usable identifier
    pub fn has_id(&self) -> bool {
        !self.posting_id.is_empty()
    }
}
