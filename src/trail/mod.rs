// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking.
//!
//! Every status change made during search is recorded as `(id, old_value)`.
//! Rewinding to a checkpoint replays the entries recorded since then in
//! reverse, restoring each old value. A search node is therefore never copied:
//! it is the current state plus the trail prefix that produced it.

/// A single entry in the trail, recording one state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailEntry {
    /// Identifier of the changed slot (a vertex index for partial objects).
    pub id: usize,
    /// The value before the change.
    pub old_value: u64,
}

/// State that can be restored from trail entries.
pub trait TrailRestore {
    /// Put `old_value` back into slot `id`.
    fn restore(&mut self, id: usize, old_value: u64);
}

/// The trail of changes for one search context.
///
/// # Memory Model
///
/// - DYNAMIC: the trail changes during search
/// - Each SearchContext owns its own trail, so batches never share one
#[derive(Debug)]
pub struct Trail {
    entries: Vec<TrailEntry>,
    capacity: usize,
}

impl Trail {
    /// Default bound on the number of live entries.
    ///
    /// Statuses only move away from Undecided, so a single branch of the
    /// search changes each vertex at most once.
    pub const MAX_SIZE: usize = crate::geometry::MAX_VERTICES;

    pub fn new() -> Self {
        Self::with_capacity(Self::MAX_SIZE)
    }

    /// A trail that holds at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// The current position, to be passed to [`Trail::rewind_to`] later.
    pub fn checkpoint(&self) -> usize {
        self.entries.len()
    }

    /// Record a state change.
    ///
    /// # Panics
    ///
    /// Panics if the trail exceeds its capacity (indicates a bug in the search algorithm).
    pub fn record_change(&mut self, id: usize, old_value: u64) {
        if self.entries.len() >= self.capacity {
            panic!("Trail overflow: exceeded {} entries", self.capacity);
        }
        self.entries.push(TrailEntry { id, old_value });
    }

    /// Undo every change made since `checkpoint`, most recent first.
    pub fn rewind_to<T: TrailRestore + ?Sized>(&mut self, checkpoint: usize, target: &mut T) {
        while self.entries.len() > checkpoint {
            if let Some(entry) = self.entries.pop() {
                target.restore(entry.id, entry.old_value);
            }
        }
    }

    /// Forget all entries without restoring anything.
    ///
    /// Used when a context is reloaded with a fresh object.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries recorded since `checkpoint`, oldest first.
    pub fn entries_since(&self, checkpoint: usize) -> &[TrailEntry] {
        &self.entries[checkpoint.min(self.entries.len())..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}
