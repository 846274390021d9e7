//! Claim poller
//!
//! Polls the hiring gateway on a fixed cadence and claims openings as they
//! appear. Each cycle walks Polling -> Dispatching -> Reporting and then
//! parks until the next tick; the cancellation token is consulted at the
//! top of every transition, never mid-call, so an in-flight dispatch always
//! drains before the loop exits.
//!
//! The previous snapshot (the ledger) lives in exactly one place: the local
//! state of `run`. It is replaced only after a cycle's dispatch has
//! completed, and a failed poll leaves it untouched.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use talon_core::domain::opening::{Opening, Snapshot};
use talon_core::domain::report::{CycleReport, CycleStatus};
use talon_core::dto::search::SearchFilter;

use crate::config::{ClaimMode, Config};
use crate::delta::detect_delta;
use crate::dispatch::dispatch;
use crate::report::aggregate;
use crate::repository::ShiftGateway;
use crate::service::{BookingLog, BookingRecord};
use crate::snapshot::build_snapshot;

/// How one poll cycle ended
pub(crate) enum CycleEnd {
    /// Snapshot built and dispatched; the snapshot becomes the new ledger
    Completed {
        report: CycleReport,
        snapshot: Snapshot,
    },

    /// Posting search failed; the ledger is retained
    SearchFailed { report: CycleReport },

    /// Cancellation arrived between states; nothing further was issued
    Cancelled,
}

/// Running totals across the life of the poller
#[derive(Debug)]
struct RunStats {
    started_at: Instant,
    cycles: u64,
    failed_cycles: u64,
    openings_seen: u64,
    appeared: u64,
    accepted: u64,
    rejected: u64,
}

impl RunStats {
    fn new() -> Self {
        Self {
            started_at: Instant::now(),
            cycles: 0,
            failed_cycles: 0,
            openings_seen: 0,
            appeared: 0,
            accepted: 0,
            rejected: 0,
        }
    }

    fn absorb(&mut self, report: &CycleReport) {
        self.cycles += 1;
        if report.status == CycleStatus::SearchFailed {
            self.failed_cycles += 1;
        }
        self.openings_seen += report.observed as u64;
        self.appeared += report.delta.appeared.len() as u64;
        self.accepted += report.dispatch.accepted_count as u64;
        self.rejected += report.dispatch.rejected_count as u64;
    }

    fn log(&self) {
        info!(
            "Stats - Cycles: {} ({} failed) | Openings seen: {} | Appeared: {} | Claims: {} accepted / {} rejected | Runtime: {:?}",
            self.cycles,
            self.failed_cycles,
            self.openings_seen,
            self.appeared,
            self.accepted,
            self.rejected,
            self.started_at.elapsed()
        );
    }
}

/// Poller that continuously discovers and claims openings
pub struct ClaimPoller {
    config: Config,
    gateway: Arc<dyn ShiftGateway>,
    booking_log: Arc<dyn BookingLog>,
    cancel: CancellationToken,
}

impl ClaimPoller {
    /// Creates a new claim poller
    pub fn new(
        config: Config,
        gateway: Arc<dyn ShiftGateway>,
        booking_log: Arc<dyn BookingLog>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config,
            gateway,
            booking_log,
            cancel,
        }
    }

    /// Starts the polling loop; returns once cancellation is observed
    pub async fn run(&self) -> Result<()> {
        info!(
            "Starting claim poller (interval: {:?}, mode: {:?}, ceiling: {})",
            self.config.poll_interval, self.config.claim_mode, self.config.max_concurrent_claims
        );

        let mut interval = time::interval(self.config.poll_interval);
        // An overrunning cycle starts the next one immediately after it
        // finishes; cycles never overlap
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ledger: Option<Snapshot> = None;
        let mut stats = RunStats::new();

        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = interval.tick() => {}
            }

            match self.run_cycle(ledger.as_ref()).await? {
                CycleEnd::Completed { report, snapshot } => {
                    self.log_cycle(&report);
                    stats.absorb(&report);
                    // The ledger changes hands only here, after dispatch
                    ledger = Some(snapshot);
                }
                CycleEnd::SearchFailed { report } => {
                    self.log_cycle(&report);
                    stats.absorb(&report);
                }
                CycleEnd::Cancelled => break,
            }

            if stats.cycles % self.config.stats_every == 0 {
                stats.log();
            }
        }

        stats.log();
        info!("Claim poller stopped");
        Ok(())
    }

    /// Performs a single poll cycle
    pub(crate) async fn run_cycle(&self, previous: Option<&Snapshot>) -> Result<CycleEnd> {
        let filter = SearchFilter {
            geo: self.config.geo,
        };

        // Polling
        let snapshot = build_snapshot(
            Arc::clone(&self.gateway),
            &filter,
            self.config.max_concurrent_searches,
        )
        .await;

        if snapshot.is_failed() {
            return Ok(CycleEnd::SearchFailed {
                report: CycleReport::search_failed(),
            });
        }

        let empty = Snapshot::complete(Vec::new(), snapshot.taken_at);
        let delta = detect_delta(previous.unwrap_or(&empty), &snapshot);

        debug!(
            "Snapshot has {} opening(s): {} appeared, {} disappeared",
            snapshot.len(),
            delta.appeared.len(),
            delta.disappeared.len()
        );

        // Dispatching
        if self.cancel.is_cancelled() {
            return Ok(CycleEnd::Cancelled);
        }

        let units: Vec<Opening> = match self.config.claim_mode {
            ClaimMode::NewOnly => delta.appeared.clone(),
            ClaimMode::All => snapshot.openings.clone(),
        };

        let dispatch_started = Instant::now();
        let outcomes = dispatch(
            units.clone(),
            Arc::clone(&self.gateway),
            self.config.max_concurrent_claims,
            self.config.claim_timeout,
        )
        .await?;
        let elapsed = dispatch_started.elapsed();

        // Reporting
        let dispatch_report = aggregate(outcomes, elapsed);

        let by_key: HashMap<&str, &Opening> =
            units.iter().map(|unit| (unit.unit_key(), unit)).collect();
        for outcome in &dispatch_report.accepted {
            info!("Claimed opening {}", outcome.unit_key);
            if let Some(opening) = by_key.get(outcome.unit_key.as_str()) {
                let record = BookingRecord::for_opening(opening, &self.config.claimant_id);
                if let Err(e) = self.booking_log.record(&record) {
                    warn!("Failed to record booking {}: {:#}", outcome.unit_key, e);
                }
            }
        }

        let report = CycleReport {
            status: CycleStatus::Completed,
            observed: snapshot.len(),
            delta,
            dispatch: dispatch_report,
        };

        Ok(CycleEnd::Completed { report, snapshot })
    }

    fn log_cycle(&self, report: &CycleReport) {
        match report.status {
            CycleStatus::SearchFailed => {
                warn!("Cycle skipped: posting search failed");
            }
            CycleStatus::Completed => {
                info!(
                    "Cycle complete - observed: {} | appeared: {} | disappeared: {} | accepted: {} | rejected: {}{}",
                    report.observed,
                    report.delta.appeared.len(),
                    report.delta.disappeared.len(),
                    report.dispatch.accepted_count,
                    report.dispatch.rejected_count,
                    match report.dispatch.throughput_per_sec {
                        Some(rate) => format!(" | {:.1} claims/s", rate),
                        None => String::new(),
                    }
                );
            }
        }
    }
}
