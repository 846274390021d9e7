//! Scheduler layer for the engine
//!
//! This layer drives the poll cycle: snapshot the gateway, diff against the
//! ledger, dispatch claims, report. It owns the only cross-cycle state (the
//! previous snapshot) and the cooperative cancellation point.

pub mod poller;

pub use poller::ClaimPoller;
