//! Snapshot diffing: signed per-process memory changes between a poll and
//! the reference it is compared against. Touches neither the OS nor the
//! terminal; the boundary is enforced by an integration test.

use std::collections::HashMap;
use std::fmt;

use crate::system::snapshot::{Snapshot, SnapshotSet};

/// Percent reported when the prior memory was a synthesized zero baseline.
/// Growth from nothing is effectively infinite; reporting a defined value
/// keeps NaN and division errors out of the pipeline.
pub const ZERO_BASELINE_PERCENT: f64 = f64::INFINITY;

/// Refusal to subtract two snapshots that denote different logical processes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityMismatch {
    pub new_pid: u32,
    pub new_name: String,
    pub old_pid: u32,
    pub old_name: String,
}

impl fmt::Display for IdentityMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} != {}: {}",
            self.new_pid, self.new_name, self.old_pid, self.old_name
        )
    }
}

impl std::error::Error for IdentityMismatch {}

/// Signed memory change between two matched snapshots. Borrows the new
/// snapshot as the subject whose name and command are reported.
#[derive(Clone, Debug)]
pub struct Delta<'a> {
    pub delta: i64,
    pub percent: f64,
    pub subject: &'a Snapshot,
}

impl<'a> Delta<'a> {
    /// `new − old`. Fails unless both snapshots carry the same identity.
    pub fn between(new: &'a Snapshot, old: &Snapshot) -> Result<Delta<'a>, IdentityMismatch> {
        if !new.same_identity(old) {
            return Err(IdentityMismatch {
                new_pid: new.pid,
                new_name: new.name.clone(),
                old_pid: old.pid,
                old_name: old.name.clone(),
            });
        }
        let delta = new.memory as i64 - old.memory as i64;
        let percent = if old.memory == 0 {
            ZERO_BASELINE_PERCENT
        } else {
            delta as f64 / old.memory as f64 * 100.0
        };
        Ok(Delta {
            delta,
            percent,
            subject: new,
        })
    }

    /// Delta against a synthesized zero-memory baseline sharing `new`'s
    /// identity. Used for processes with no valid prior reading.
    pub fn from_zero_baseline(new: &'a Snapshot) -> Delta<'a> {
        Delta {
            delta: new.memory as i64,
            percent: ZERO_BASELINE_PERCENT,
            subject: new,
        }
    }
}

/// One delta per pid of the diffed poll, in that poll's iteration order.
/// Transient: built once per poll, consumed by rendering, then dropped.
#[derive(Debug, Default)]
pub struct DeltaSet<'a> {
    order: Vec<Delta<'a>>,
    index: HashMap<u32, usize>,
}

impl<'a> DeltaSet<'a> {
    fn insert(&mut self, delta: Delta<'a>) {
        self.index.insert(delta.subject.pid, self.order.len());
        self.order.push(delta);
    }

    pub fn get(&self, pid: u32) -> Option<&Delta<'a>> {
        self.index.get(&pid).map(|&i| &self.order[i])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Delta<'a>> {
        self.order.iter()
    }

    /// Deltas ordered ascending by signed change, stable for equal values.
    pub fn ranked(&self) -> Vec<&Delta<'a>> {
        let mut ordered: Vec<&Delta<'a>> = self.order.iter().collect();
        ordered.sort_by_key(|d| d.delta);
        ordered
    }
}

/// Diffs a new poll against the held reference, one delta per pid in `new`:
/// matched identities subtract normally; a recycled pid (name changed) or a
/// pid absent from the reference is reported as a fresh process growing from
/// a zero baseline. Pids only in the reference (exited since the last poll)
/// produce nothing.
pub fn diff<'a>(new: &'a SnapshotSet, reference: &SnapshotSet) -> DeltaSet<'a> {
    let mut out = DeltaSet::default();
    for snapshot in new.iter() {
        let delta = match reference.get(snapshot.pid) {
            Some(old) => match Delta::between(snapshot, old) {
                Ok(delta) => delta,
                Err(_) => Delta::from_zero_baseline(snapshot),
            },
            None => Delta::from_zero_baseline(snapshot),
        };
        out.insert(delta);
    }
    out
}
