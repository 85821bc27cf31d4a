use std::collections::HashMap;

use proptest::prelude::*;

use leaktop::delta::{ZERO_BASELINE_PERCENT, diff};
use leaktop::system::snapshot::{Snapshot, SnapshotSet};

fn set_from(entries: &HashMap<u32, u64>) -> SnapshotSet {
    let mut set = SnapshotSet::new();
    for (&pid, &memory) in entries {
        set.insert(Snapshot {
            pid,
            name: format!("proc{pid}"),
            command: vec![format!("proc{pid}")],
            memory,
        });
    }
    set
}

proptest! {
    #[test]
    fn sorted_is_a_nondecreasing_bijection(
        entries in prop::collection::hash_map(1u32..50_000, 1u64..(1 << 40), 0..200),
    ) {
        let set = set_from(&entries);
        let sorted = set.sorted();

        prop_assert_eq!(sorted.len(), set.len());
        let memories: Vec<u64> = sorted.iter().map(|s| s.memory).collect();
        prop_assert!(
            memories.windows(2).all(|w| w[0] <= w[1]),
            "not ascending: {:?}", memories
        );
        for snapshot in set.iter() {
            prop_assert_eq!(
                sorted.get(snapshot.pid).map(|s| s.memory),
                Some(snapshot.memory)
            );
        }
    }

    #[test]
    fn diff_yields_one_delta_per_new_pid(
        new in prop::collection::hash_map(1u32..10_000, 1u64..(1 << 40), 0..150),
        old in prop::collection::hash_map(1u32..10_000, 1u64..(1 << 40), 0..150),
    ) {
        let new_set = set_from(&new);
        let old_set = set_from(&old);
        let deltas = diff(&new_set, &old_set);

        prop_assert_eq!(deltas.len(), new_set.len());
        for snapshot in new_set.iter() {
            prop_assert!(deltas.get(snapshot.pid).is_some());
        }
    }

    #[test]
    fn self_diff_is_all_zero(
        entries in prop::collection::hash_map(1u32..10_000, 1u64..(1 << 40), 0..150),
    ) {
        let set = set_from(&entries);
        let deltas = diff(&set, &set);

        prop_assert_eq!(deltas.len(), set.len());
        for delta in deltas.iter() {
            prop_assert_eq!(delta.delta, 0);
            prop_assert_eq!(delta.percent, 0.0);
        }
    }

    #[test]
    fn matched_delta_is_the_memory_difference(
        pid in 1u32..10_000,
        old_mem in 1u64..(1 << 40),
        new_mem in 1u64..(1 << 40),
    ) {
        let mut old_set = SnapshotSet::new();
        old_set.insert(Snapshot {
            pid,
            name: "p".to_string(),
            command: Vec::new(),
            memory: old_mem,
        });
        let mut new_set = SnapshotSet::new();
        new_set.insert(Snapshot {
            pid,
            name: "p".to_string(),
            command: Vec::new(),
            memory: new_mem,
        });

        let deltas = diff(&new_set, &old_set);
        let delta = deltas.get(pid).unwrap();
        prop_assert_eq!(delta.delta, new_mem as i64 - old_mem as i64);
        let expected = delta.delta as f64 / old_mem as f64 * 100.0;
        prop_assert!((delta.percent - expected).abs() < 1e-9);
        prop_assert!(!delta.percent.is_nan());
    }

    #[test]
    fn unmatched_pids_report_fresh_growth(
        pid in 1u32..10_000,
        memory in 1u64..(1 << 40),
    ) {
        let mut new_set = SnapshotSet::new();
        new_set.insert(Snapshot {
            pid,
            name: "p".to_string(),
            command: Vec::new(),
            memory,
        });

        let deltas = diff(&new_set, &SnapshotSet::new());
        let delta = deltas.get(pid).unwrap();
        prop_assert_eq!(delta.delta, memory as i64);
        prop_assert_eq!(delta.percent, ZERO_BASELINE_PERCENT);
    }
}
