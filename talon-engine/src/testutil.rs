//! Test helpers shared across engine modules
//!
//! Provides a scripted in-memory gateway so the snapshot builder,
//! dispatcher and poller can be exercised without any network.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use talon_core::domain::opening::Opening;
use talon_core::domain::posting::JobPosting;
use talon_core::domain::slot::ShiftSlot;
use talon_core::dto::search::SearchFilter;

use crate::repository::ShiftGateway;

pub fn posting(id: &str) -> JobPosting {
    JobPosting {
        posting_id: id.to_string(),
        title: Some(format!("Posting {}", id)),
        city: Some("Toronto".to_string()),
        state: None,
        postal_code: None,
        employment_type: None,
    }
}

pub fn slot(posting_id: &str, slot_id: &str) -> ShiftSlot {
    ShiftSlot {
        slot_id: slot_id.to_string(),
        posting_id: posting_id.to_string(),
        open_count: 1,
        start_date: None,
        base_pay: None,
        hours_per_week: None,
    }
}

pub fn opening(posting_id: &str, slot_id: &str) -> Opening {
    Opening::new(posting(posting_id), slot(posting_id, slot_id))
}

/// One scripted answer to a posting search
enum PostingStep {
    Postings(Vec<JobPosting>),
    Failure,
}

/// Scripted gateway
///
/// Posting searches consume the queued steps first and fall back to the
/// static posting list (or the permanent-failure flag) once the queue is
/// drained. Slot and claim behavior is keyed statically.
#[derive(Default)]
pub struct MockGateway {
    postings: Vec<JobPosting>,
    posting_queue: Mutex<VecDeque<PostingStep>>,
    posting_search_fails: bool,
    slots: HashMap<String, Vec<ShiftSlot>>,
    failing_slot_searches: HashSet<String>,
    failing_claims: HashSet<String>,
    claim_delay: Option<Duration>,
    claims: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static posting list returned by every (unqueued) search
    pub fn with_postings(mut self, postings: Vec<JobPosting>) -> Self {
        self.postings = postings;
        self
    }

    /// Queues a one-shot posting result for the next search
    pub fn queue_postings(self, postings: Vec<JobPosting>) -> Self {
        self.posting_queue
            .lock()
            .unwrap()
            .push_back(PostingStep::Postings(postings));
        self
    }

    /// Queues a one-shot posting-search failure
    pub fn queue_posting_failure(self) -> Self {
        self.posting_queue
            .lock()
            .unwrap()
            .push_back(PostingStep::Failure);
        self
    }

    /// Makes every (unqueued) posting search fail
    pub fn fail_posting_search(mut self) -> Self {
        self.posting_search_fails = true;
        self
    }

    pub fn with_slots(mut self, posting_id: &str, slots: Vec<ShiftSlot>) -> Self {
        self.slots.insert(posting_id.to_string(), slots);
        self
    }

    pub fn fail_slots_for(mut self, posting_id: &str) -> Self {
        self.failing_slot_searches.insert(posting_id.to_string());
        self
    }

    /// Makes the claim for one unit key fail
    pub fn fail_claim(mut self, unit_key: &str) -> Self {
        self.failing_claims.insert(unit_key.to_string());
        self
    }

    /// Holds every claim for the given duration before answering
    pub fn with_claim_delay(mut self, delay: Duration) -> Self {
        self.claim_delay = Some(delay);
        self
    }

    /// Unit keys claimed so far, in arrival order
    pub fn claimed(&self) -> Vec<String> {
        self.claims.lock().unwrap().clone()
    }

    /// Highest number of claims that were in flight at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ShiftGateway for MockGateway {
    async fn search_postings(&self, _filter: &SearchFilter) -> Result<Vec<JobPosting>> {
        let step = self.posting_queue.lock().unwrap().pop_front();
        match step {
            Some(PostingStep::Postings(postings)) => Ok(postings),
            Some(PostingStep::Failure) => Err(anyhow::anyhow!("posting search unavailable")),
            None if self.posting_search_fails => {
                Err(anyhow::anyhow!("posting search unavailable"))
            }
            None => Ok(self.postings.clone()),
        }
    }

    async fn search_slots(
        &self,
        posting_id: &str,
        _filter: &SearchFilter,
    ) -> Result<Vec<ShiftSlot>> {
        if self.failing_slot_searches.contains(posting_id) {
            return Err(anyhow::anyhow!("slot search unavailable for {}", posting_id));
        }
        Ok(self.slots.get(posting_id).cloned().unwrap_or_default())
    }

    async fn claim(&self, posting_id: &str, slot_id: &str) -> Result<()> {
        let unit_key = format!("{}-{}", posting_id, slot_id);
        self.claims.lock().unwrap().push(unit_key.clone());

        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight
            .fetch_max(now_in_flight, Ordering::SeqCst);

        if let Some(delay) = self.claim_delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_claims.contains(&unit_key) {
            return Err(anyhow::anyhow!("claim rejected for {}", unit_key));
        }
        Ok(())
    }
}
