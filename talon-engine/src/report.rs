//! Outcome aggregator
//!
//! Reduces the dispatcher's per-unit outcomes into one report: counts,
//! throughput and the accepted/rejected partitions in their original
//! relative order.

use std::time::Duration;

use talon_core::domain::outcome::ClaimOutcome;
use talon_core::domain::report::DispatchReport;

/// Aggregates claim outcomes over the dispatch window
///
/// Invariant: `accepted_count + rejected_count == total == outcomes.len()`.
/// A zero-length window reports throughput as unavailable instead of
/// dividing by zero.
pub fn aggregate(outcomes: Vec<ClaimOutcome>, elapsed: Duration) -> DispatchReport {
    let (accepted, rejected): (Vec<ClaimOutcome>, Vec<ClaimOutcome>) =
        outcomes.into_iter().partition(ClaimOutcome::is_accepted);

    let total = accepted.len() + rejected.len();

    let throughput_per_sec = if elapsed.is_zero() {
        None
    } else {
        Some(total as f64 / elapsed.as_secs_f64())
    };

    DispatchReport {
        accepted_count: accepted.len(),
        rejected_count: rejected.len(),
        total,
        throughput_per_sec,
        accepted,
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(key: &str, accepted: bool) -> ClaimOutcome {
        if accepted {
            ClaimOutcome::accepted(key)
        } else {
            ClaimOutcome::rejected(key, "slot gone")
        }
    }

    #[test]
    fn test_counts_always_add_up() {
        let outcomes = vec![
            outcome("P1-C1", true),
            outcome("P1-C2", false),
            outcome("P2-C1", true),
            outcome("P2-C2", false),
            outcome("P3-C1", false),
        ];

        let report = aggregate(outcomes, Duration::from_secs(2));

        assert_eq!(report.accepted_count, 2);
        assert_eq!(report.rejected_count, 3);
        assert_eq!(report.accepted_count + report.rejected_count, report.total);
        assert_eq!(report.total, 5);
    }

    #[test]
    fn test_partitions_preserve_relative_order() {
        let outcomes = vec![
            outcome("a", false),
            outcome("b", true),
            outcome("c", false),
            outcome("d", true),
        ];

        let report = aggregate(outcomes, Duration::from_secs(1));

        let accepted: Vec<&str> =
            report.accepted.iter().map(|o| o.unit_key.as_str()).collect();
        let rejected: Vec<&str> =
            report.rejected.iter().map(|o| o.unit_key.as_str()).collect();
        assert_eq!(accepted, vec!["b", "d"]);
        assert_eq!(rejected, vec!["a", "c"]);
    }

    #[test]
    fn test_zero_elapsed_reports_no_throughput() {
        let report = aggregate(vec![outcome("a", true)], Duration::ZERO);
        assert!(report.throughput_per_sec.is_none());

        let report = aggregate(vec![outcome("a", true)], Duration::from_secs(1));
        assert_eq!(report.throughput_per_sec, Some(1.0));
    }

    #[test]
    fn test_empty_outcomes_aggregate_cleanly() {
        let report = aggregate(Vec::new(), Duration::from_secs(1));
        assert_eq!(report.total, 0);
        assert_eq!(report.throughput_per_sec, Some(0.0));
    }
}
