//! Bounded claim dispatcher
//!
//! Fans claim attempts out over the gateway with a hard ceiling on how many
//! are in flight at once. Admission is a counting semaphore: an attempt
//! holds a permit for exactly the duration of its claim call, and the
//! permit is released on every exit path, including panics, because it is
//! an owned RAII guard dropped with the task.
//!
//! Attempts are independent: one rejected, timed-out or panicking claim is
//! captured as that unit's outcome and never cancels or delays the rest.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::Semaphore;
use tracing::warn;

use talon_core::domain::opening::Opening;
use talon_core::domain::outcome::ClaimOutcome;

use crate::repository::ShiftGateway;

/// Dispatches one claim attempt per opening, at most `max_concurrent` in
/// flight at any instant
///
/// # Arguments
/// * `units` - The openings to claim; an empty slice returns immediately
///   without touching the gateway
/// * `gateway` - The hiring gateway
/// * `max_concurrent` - Dispatch ceiling; zero is a configuration error
///   rejected before any gateway call
/// * `claim_timeout` - Per-claim bound; a timed-out claim is a rejection,
///   not a fault
///
/// # Returns
/// Exactly one outcome per input unit, in input order (outcomes correlate
/// to units by position, not completion order).
pub async fn dispatch(
    units: Vec<Opening>,
    gateway: Arc<dyn ShiftGateway>,
    max_concurrent: usize,
    claim_timeout: Duration,
) -> Result<Vec<ClaimOutcome>> {
    if max_concurrent == 0 {
        anyhow::bail!("dispatch ceiling must be at least 1");
    }

    if units.is_empty() {
        return Ok(Vec::new());
    }

    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let mut handles = Vec::with_capacity(units.len());

    for unit in units {
        let unit_key = unit.unit_key().to_string();
        let gateway = Arc::clone(&gateway);
        let semaphore = Arc::clone(&semaphore);

        let handle = tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return ClaimOutcome::rejected(unit.unit_key(), "dispatcher shut down");
                }
            };

            let claim = gateway.claim(&unit.posting.posting_id, &unit.slot.slot_id);
            match tokio::time::timeout(claim_timeout, claim).await {
                Ok(Ok(())) => ClaimOutcome::accepted(unit.unit_key()),
                Ok(Err(e)) => ClaimOutcome::rejected(unit.unit_key(), format!("{:#}", e)),
                Err(_) => ClaimOutcome::rejected(
                    unit.unit_key(),
                    format!("claim timed out after {:?}", claim_timeout),
                ),
            }
        });

        handles.push((unit_key, handle));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (unit_key, handle) in handles {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                warn!("Claim task for {} panicked: {}", unit_key, e);
                outcomes.push(ClaimOutcome::rejected(
                    unit_key,
                    format!("claim task panicked: {}", e),
                ));
            }
        }
    }

    Ok(outcomes)
}
