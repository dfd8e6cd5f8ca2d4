//! Snapshot history for single-step undo.

use std::collections::VecDeque;

use tracing::debug;

use crate::tape::Tape;
use crate::types::Status;

/// A full copy of an engine configuration, taken just before a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: String,
    pub tape: Tape,
    pub head: i64,
    pub step_count: usize,
    pub status: Status,
}

/// A stack of snapshots, optionally bounded.
///
/// With a limit of `n`, only the `n` most recent snapshots are kept and the oldest one is dropped
/// when a new one arrives. A limit of zero disables undo entirely.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    limit: Option<usize>,
}

impl History {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            snapshots: VecDeque::new(),
            limit,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        if self.limit == Some(0) {
            return;
        }

        self.snapshots.push_back(snapshot);

        if let Some(limit) = self.limit {
            while self.snapshots.len() > limit {
                if let Some(evicted) = self.snapshots.pop_front() {
                    debug!(step = evicted.step_count, limit, "history full, dropping oldest snapshot");
                }
            }
        }
    }

    /// Removes and returns the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
