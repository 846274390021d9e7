//! Delta detector
//!
//! Compares two consecutive snapshots by unit key and reports what appeared
//! and what disappeared. Pure function: no I/O, no side effects,
//! O(|previous| + |current|).

use std::collections::HashSet;

use talon_core::domain::opening::{Snapshot, SnapshotDelta};

/// Computes the delta between the previous and current snapshot
///
/// With an empty previous snapshot (first cycle) everything in current
/// counts as appeared and nothing as disappeared.
pub fn detect_delta(previous: &Snapshot, current: &Snapshot) -> SnapshotDelta {
    let previous_keys: HashSet<&str> = previous
        .openings
        .iter()
        .map(|opening| opening.unit_key())
        .collect();
    let current_keys: HashSet<&str> = current
        .openings
        .iter()
        .map(|opening| opening.unit_key())
        .collect();

    let appeared = current
        .openings
        .iter()
        .filter(|opening| !previous_keys.contains(opening.unit_key()))
        .cloned()
        .collect();

    let disappeared = previous
        .openings
        .iter()
        .filter(|opening| !current_keys.contains(opening.unit_key()))
        .cloned()
        .collect();

    SnapshotDelta {
        appeared,
        disappeared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::opening;
    use chrono::Utc;
    use std::collections::BTreeSet;
    use talon_core::domain::opening::Opening;

    fn snapshot(keys: &[(&str, &str)]) -> Snapshot {
        let openings = keys
            .iter()
            .map(|(posting_id, slot_id)| opening(posting_id, slot_id))
            .collect();
        Snapshot::complete(openings, Utc::now())
    }

    fn keys(openings: &[Opening]) -> BTreeSet<String> {
        openings.iter().map(|o| o.unit_key().to_string()).collect()
    }

    #[test]
    fn test_new_opening_appears() {
        let previous = snapshot(&[("P1", "C1")]);
        let current = snapshot(&[("P1", "C1"), ("P1", "C2")]);

        let delta = detect_delta(&previous, &current);

        assert_eq!(keys(&delta.appeared), BTreeSet::from(["P1-C2".to_string()]));
        assert!(delta.disappeared.is_empty());
    }

    #[test]
    fn test_removed_opening_disappears() {
        let previous = snapshot(&[("P1", "C1"), ("P1", "C2")]);
        let current = snapshot(&[("P1", "C1")]);

        let delta = detect_delta(&previous, &current);

        assert!(delta.appeared.is_empty());
        assert_eq!(
            keys(&delta.disappeared),
            BTreeSet::from(["P1-C2".to_string()])
        );
    }

    #[test]
    fn test_empty_previous_means_everything_appeared() {
        let previous = snapshot(&[]);
        let current = snapshot(&[("P1", "C1"), ("P2", "C1")]);

        let delta = detect_delta(&previous, &current);

        assert_eq!(keys(&delta.appeared), keys(&current.openings));
        assert!(delta.disappeared.is_empty());
    }

    #[test]
    fn test_appeared_and_disappeared_partition_symmetric_difference() {
        let previous = snapshot(&[("P1", "C1"), ("P1", "C2"), ("P2", "C1")]);
        let current = snapshot(&[("P1", "C2"), ("P2", "C1"), ("P3", "C1")]);

        let delta = detect_delta(&previous, &current);

        let appeared = keys(&delta.appeared);
        let disappeared = keys(&delta.disappeared);

        // Disjoint
        assert!(appeared.is_disjoint(&disappeared));

        // Union equals the symmetric difference of the two key sets
        let previous_keys = keys(&previous.openings);
        let current_keys = keys(&current.openings);
        let symmetric: BTreeSet<String> = previous_keys
            .symmetric_difference(&current_keys)
            .cloned()
            .collect();
        let union: BTreeSet<String> = appeared.union(&disappeared).cloned().collect();
        assert_eq!(union, symmetric);
    }

    #[test]
    fn test_failed_current_snapshot_yields_no_appearances() {
        let previous = snapshot(&[("P1", "C1")]);
        let current = Snapshot::search_failed(Utc::now());

        let delta = detect_delta(&previous, &current);

        assert!(delta.appeared.is_empty());
    }

    #[test]
    fn test_delta_is_idempotent() {
        let previous = snapshot(&[("P1", "C1"), ("P1", "C2")]);
        let current = snapshot(&[("P1", "C2"), ("P3", "C1")]);

        let first = detect_delta(&previous, &current);
        let second = detect_delta(&previous, &current);

        assert_eq!(keys(&first.appeared), keys(&second.appeared));
        assert_eq!(keys(&first.disappeared), keys(&second.disappeared));
    }
}
