// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Grouping of vertex sets by canonical form.
//!
//! The first representative of each isomorphism class wins, so the result of
//! deduplicating an ordered collection is itself ordered and reproducible.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{BatchReport, Output};
use crate::error::Result;
use crate::geometry::VertexSet;
use crate::state::PrunerCounters;
use crate::symmetry::SymmetryGroup;

/// Remembers which isomorphism classes have been seen.
///
/// Symmetry groups are built lazily, one per dimension encountered.
#[derive(Debug, Default)]
pub struct Deduplicator {
    groups: HashMap<usize, SymmetryGroup>,
    seen: HashSet<VertexSet>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already built group.
    pub fn with_group(group: SymmetryGroup) -> Self {
        let mut groups = HashMap::new();
        groups.insert(group.dimension(), group);
        Self {
            groups,
            seen: HashSet::new(),
        }
    }

    /// Record `set`, returning true if its class was new.
    pub fn insert(&mut self, set: &VertexSet) -> Result<bool> {
        let group = match self.groups.entry(set.dimension()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(SymmetryGroup::new(set.dimension())?),
        };
        Ok(self.seen.insert(group.canonical_form(set)))
    }

    /// Number of classes seen.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// One representative per isomorphism class, in first-seen order.
pub fn filter_isomorphic(collection: &[VertexSet]) -> Result<Vec<VertexSet>> {
    let mut dedup = Deduplicator::new();
    let mut kept = Vec::new();
    for set in collection {
        if dedup.insert(set)? {
            kept.push(set.clone());
        }
    }
    Ok(kept)
}

/// The union of several batches, deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedReport {
    pub outputs: Vec<Output>,
    pub counters: PrunerCounters,
    /// Batch ids merged, in the order given.
    pub batches: Vec<usize>,
}

/// Join the reports of completed batches.
///
/// Outputs are re-grouped by canonical form, keeping batch order; counters
/// are summed.
pub fn merge_reports(reports: &[BatchReport]) -> Result<MergedReport> {
    let mut dedup = Deduplicator::new();
    let mut outputs = Vec::new();
    for output in reports.iter().flat_map(|report| &report.outputs) {
        if dedup.insert(&output.vertices)? {
            outputs.push(output.clone());
        }
    }
    let counters = reports.iter().map(|report| report.counters).sum();
    debug!(
        batches = reports.len(),
        classes = outputs.len(),
        "batch reports merged"
    );
    Ok(MergedReport {
        outputs,
        counters,
        batches: reports.iter().map(|report| report.batch_id).collect(),
    })
}
