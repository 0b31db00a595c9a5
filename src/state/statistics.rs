// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Pruner activation counts are kept in the search context and reported per
//! batch. Counts from several batches combine by summing.

use std::fmt;

use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString, IntoStaticStr};

/// The pruning rules, in the order they are applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCountMacro, EnumIter, IntoStaticStr, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Pruner {
    Closure,
    Intersecting,
    Cover,
    Minimal,
    Critical,
}

/// Per-pruner activation counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PrunerCounters {
    counts: [u64; Pruner::COUNT],
}

impl PrunerCounters {
    pub fn new() -> Self {
        PrunerCounters::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, pruner: Pruner) {
        self.counts[pruner as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, pruner: Pruner) -> u64 {
        self.counts[pruner as usize]
    }

    /// Add another set of counts into this one.
    pub fn merge(&mut self, other: &PrunerCounters) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(pruner, count)` for every pruner, in application order.
    pub fn iter(&self) -> impl Iterator<Item = (Pruner, u64)> + '_ {
        Pruner::iter().map(move |pruner| (pruner, self.get(pruner)))
    }
}

impl fmt::Display for PrunerCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(pruner, count)| format!("{}={}", pruner, count))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

impl std::iter::Sum for PrunerCounters {
    fn sum<I: Iterator<Item = PrunerCounters>>(iter: I) -> Self {
        iter.fold(PrunerCounters::new(), |mut total, counters| {
            total.merge(&counters);
            total
        })
    }
}
