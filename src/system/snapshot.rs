use std::collections::HashMap;

/// One process's memory reading at a specific poll. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub pid: u32,
    pub name: String,
    pub command: Vec<String>,
    pub memory: u64,
}

impl Snapshot {
    /// Two snapshots denote the same logical process iff pid and name both
    /// match. The OS may hand a pid to an unrelated process between polls;
    /// checking the name as well reduces false continuity.
    pub fn same_identity(&self, other: &Snapshot) -> bool {
        self.pid == other.pid && self.name == other.name
    }

    /// Synthetic zero-memory snapshot sharing this one's identity, used as
    /// the baseline for processes with no valid prior reading.
    pub fn zero_baseline(&self) -> Snapshot {
        Snapshot {
            pid: self.pid,
            name: self.name.clone(),
            command: Vec::new(),
            memory: 0,
        }
    }
}

/// The complete set of snapshots for one poll, keyed by pid and iterated in
/// insertion order.
#[derive(Clone, Debug, Default)]
pub struct SnapshotSet {
    order: Vec<u32>,
    entries: HashMap<u32, Snapshot>,
}

impl SnapshotSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a snapshot keyed by its pid. A zero-memory snapshot is
    /// discarded: a process the sampler cannot size is not tracked. A later
    /// insert for an existing pid overwrites the value but keeps the pid's
    /// original position.
    pub fn insert(&mut self, snapshot: Snapshot) {
        if snapshot.memory == 0 {
            return;
        }
        let pid = snapshot.pid;
        if self.entries.insert(pid, snapshot).is_none() {
            self.order.push(pid);
        }
    }

    pub fn get(&self, pid: u32) -> Option<&Snapshot> {
        self.entries.get(&pid)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.order.iter().filter_map(|pid| self.entries.get(pid))
    }

    /// New set holding the same snapshots, iterated ascending by memory.
    /// Stable for equal readings; the receiver is unchanged.
    pub fn sorted(&self) -> SnapshotSet {
        let mut snapshots: Vec<&Snapshot> = self.iter().collect();
        snapshots.sort_by_key(|s| s.memory);
        let mut out = SnapshotSet::new();
        for snapshot in snapshots {
            out.insert(snapshot.clone());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(pid: u32, name: &str, memory: u64) -> Snapshot {
        Snapshot {
            pid,
            name: name.to_string(),
            command: vec![name.to_string()],
            memory,
        }
    }

    #[test]
    fn zero_memory_snapshots_are_rejected() {
        let mut set = SnapshotSet::new();
        set.insert(snap(1, "a", 0));
        assert!(set.is_empty());
        assert!(set.get(1).is_none());
    }

    #[test]
    fn reinsert_overwrites_value_and_keeps_position() {
        let mut set = SnapshotSet::new();
        set.insert(snap(1, "a", 100));
        set.insert(snap(2, "b", 200));
        set.insert(snap(1, "a", 300));

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().memory, 300);
        let pids: Vec<u32> = set.iter().map(|s| s.pid).collect();
        assert_eq!(pids, vec![1, 2]);
    }

    #[test]
    fn sorted_is_ascending_and_bijective() {
        let mut set = SnapshotSet::new();
        set.insert(snap(1, "a", 500));
        set.insert(snap(2, "b", 100));
        set.insert(snap(3, "c", 300));

        let sorted = set.sorted();
        assert_eq!(sorted.len(), set.len());
        let memories: Vec<u64> = sorted.iter().map(|s| s.memory).collect();
        assert_eq!(memories, vec![100, 300, 500]);
        // receiver unchanged
        let original: Vec<u32> = set.iter().map(|s| s.pid).collect();
        assert_eq!(original, vec![1, 2, 3]);
    }

    #[test]
    fn sorted_is_stable_for_equal_memory() {
        let mut set = SnapshotSet::new();
        set.insert(snap(9, "x", 100));
        set.insert(snap(4, "y", 100));
        set.insert(snap(7, "z", 100));

        let pids: Vec<u32> = set.sorted().iter().map(|s| s.pid).collect();
        assert_eq!(pids, vec![9, 4, 7]);
    }

    #[test]
    fn identity_requires_pid_and_name() {
        assert!(snap(1, "x", 10).same_identity(&snap(1, "x", 999)));
        assert!(!snap(1, "x", 10).same_identity(&snap(2, "x", 10)));
        assert!(!snap(1, "x", 10).same_identity(&snap(1, "y", 10)));
    }

    #[test]
    fn zero_baseline_shares_identity() {
        let s = snap(42, "leaky", 4096);
        let base = s.zero_baseline();
        assert!(s.same_identity(&base));
        assert_eq!(base.memory, 0);
        assert!(base.command.is_empty());
    }
}
