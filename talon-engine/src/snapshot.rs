//! Snapshot builder
//!
//! Flattens the gateway's two-level result set (postings and their shift
//! slots) into one snapshot of claimable openings. Slot searches for
//! different postings are independent reads and are issued concurrently
//! under a semaphore ceiling.
//!
//! Failure containment: a failed posting search fails the whole build (the
//! snapshot comes back tagged `SearchFailed`); a failed slot search only
//! costs that posting its openings.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use talon_core::domain::opening::{Opening, Snapshot};
use talon_core::dto::search::SearchFilter;

use crate::repository::ShiftGateway;

/// Builds a snapshot of every claimable opening currently visible
///
/// # Arguments
/// * `gateway` - The hiring gateway
/// * `filter` - Search parameters forwarded to both search operations
/// * `max_concurrent_searches` - Ceiling on in-flight slot searches; comes
///   from validated configuration and must be at least 1
pub async fn build_snapshot(
    gateway: Arc<dyn ShiftGateway>,
    filter: &SearchFilter,
    max_concurrent_searches: usize,
) -> Snapshot {
    let taken_at = Utc::now();

    let postings = match gateway.search_postings(filter).await {
        Ok(postings) => postings,
        Err(e) => {
            warn!("Posting search failed, skipping cycle: {:#}", e);
            return Snapshot::search_failed(taken_at);
        }
    };

    debug!("Posting search returned {} cards", postings.len());

    let semaphore = Arc::new(Semaphore::new(max_concurrent_searches));
    let mut handles = Vec::with_capacity(postings.len());

    for posting in postings {
        if !posting.has_id() {
            debug!("Skipping posting card without an id");
            continue;
        }

        let gateway = Arc::clone(&gateway);
        let semaphore = Arc::clone(&semaphore);
        let filter = filter.clone();

        handles.push(tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return Vec::new(),
            };

            match gateway.search_slots(&posting.posting_id, &filter).await {
                Ok(slots) => slots
                    .into_iter()
                    .filter(|slot| slot.has_id())
                    .map(|slot| Opening::new(posting.clone(), slot))
                    .collect(),
                Err(e) => {
                    // One posting's slots are lost, the build goes on
                    warn!(
                        "Slot search failed for posting {}: {:#}",
                        posting.posting_id, e
                    );
                    Vec::new()
                }
            }
        }));
    }

    let mut openings = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(mut units) => openings.append(&mut units),
            Err(e) => warn!("Slot search task panicked: {}", e),
        }
    }

    Snapshot::complete(openings, taken_at)
}
