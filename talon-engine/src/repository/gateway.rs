//! Hiring gateway repository
//!
//! Handles communication with the remote hiring gateway:
//! - Searching job postings
//! - Searching shift slots for a posting
//! - Claiming a slot for the configured candidate

use anyhow::{Context, Result};
use async_trait::async_trait;

use talon_client::HiringClient;
use talon_core::domain::posting::JobPosting;
use talon_core::domain::slot::ShiftSlot;
use talon_core::dto::claim::CreateApplicationRequest;
use talon_core::dto::search::SearchFilter;

/// Repository trait for the three remote gateway operations
///
/// Both read operations are idempotent; `claim` is not. Implementations
/// must bound every call with a timeout and return a typed error instead
/// of panicking, whatever the gateway does.
#[async_trait]
pub trait ShiftGateway: Send + Sync {
    /// Fetches the current set of job postings
    ///
    /// # Arguments
    /// * `filter` - Search parameters; `None` geo clause means a global
    ///   search
    async fn search_postings(&self, filter: &SearchFilter) -> Result<Vec<JobPosting>>;

    /// Fetches the shift slots of one posting
    ///
    /// # Arguments
    /// * `posting_id` - The posting whose slots to fetch
    async fn search_slots(
        &self,
        posting_id: &str,
        filter: &SearchFilter,
    ) -> Result<Vec<ShiftSlot>>;

    /// Attempts to claim one slot
    ///
    /// # Arguments
    /// * `posting_id` - The posting the slot belongs to
    /// * `slot_id` - The slot being claimed
    async fn claim(&self, posting_id: &str, slot_id: &str) -> Result<()>;
}

/// HTTP implementation of ShiftGateway
pub struct HttpShiftGateway {
    client: HiringClient,
    claimant_id: String,
}

impl HttpShiftGateway {
    /// Creates a new HTTP gateway
    ///
    /// # Arguments
    /// * `client` - The configured hiring client
    /// * `claimant_id` - Candidate identifier sent with every claim
    pub fn new(client: HiringClient, claimant_id: String) -> Self {
        Self {
            client,
            claimant_id,
        }
    }
}

#[async_trait]
impl ShiftGateway for HttpShiftGateway {
    async fn search_postings(&self, filter: &SearchFilter) -> Result<Vec<JobPosting>> {
        self.client
            .search_job_postings(filter)
            .await
            .context("Failed to search job postings")
    }

    async fn search_slots(
        &self,
        posting_id: &str,
        filter: &SearchFilter,
    ) -> Result<Vec<ShiftSlot>> {
        self.client
            .search_shift_slots(posting_id, filter)
            .await
            .with_context(|| format!("Failed to search slots for posting {}", posting_id))
    }

    async fn claim(&self, posting_id: &str, slot_id: &str) -> Result<()> {
        let req = CreateApplicationRequest::new(posting_id, slot_id, self.claimant_id.clone());

        self.client
            .create_application(&req)
            .await
            .with_context(|| format!("Failed to claim {}-{}", posting_id, slot_id))
    }
}
