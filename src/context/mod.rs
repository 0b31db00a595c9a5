// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context combining MEMO and DYNAMIC state.
//!
//! The SearchContext is the core data structure that combines:
//! - Tier 1 (MEMO): Immutable precomputed data for one dimension
//! - Tier 2 (DYNAMIC): The live partial object, restored through the trail
//!
//! plus the parameters of the run and its pruner counters. Batches each own a
//! context, so they never share mutable state.

pub mod dynamic;
pub mod memoized;

pub use dynamic::DynamicState;
pub use memoized::MemoizedData;

use tracing::trace;

use crate::error::Result;
use crate::geometry::{Vertex, VertexSet};
use crate::propagation::{self, ClosureFailure, ClosureRules};
use crate::pruners::PrunerSet;
use crate::state::{PartialObject, Pruner, PrunerCounters, Status};
use crate::trail::Trail;

/// What a search run enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Maximum (or exact, for half-dense search) number of Infeasible
    /// neighbors of an Infeasible vertex.
    pub degree: usize,
    pub rules: ClosureRules,
    pub pruners: PrunerSet,
}

/// Search context combining MEMO and DYNAMIC state.
///
/// # Memory Model
///
/// ```text
/// SearchContext {
///     memo: MemoizedData,        // Tier 1: Immutable, copied per batch
///     params: SearchParams,      // fixed for the run
///     trail: Trail,              // Tier 2: Mutable, owned
///     state: DynamicState,       // Tier 2: Mutable, owned
///     statistics: PrunerCounters // accumulated over the run
/// }
/// ```
///
/// # Example
///
/// ```
/// use nonpolar_search::context::{SearchContext, SearchParams};
/// use nonpolar_search::geometry::Vertex;
/// use nonpolar_search::propagation::ClosureRules;
/// use nonpolar_search::pruners::PrunerSet;
/// use nonpolar_search::state::Status;
///
/// let params = SearchParams { degree: 1, rules: ClosureRules::STRICT, pruners: PrunerSet::none() };
/// let mut ctx = SearchContext::new(3, params).unwrap();
/// let checkpoint = ctx.trail.checkpoint();
/// ctx.decide(Vertex::new(0b001), Status::Feasible).unwrap();
/// assert_eq!(ctx.state.object.status(Vertex::new(0b110)), Status::Infeasible);
/// ctx.rewind_to(checkpoint);
/// assert_eq!(ctx.state.object.undecided_count(), 8);
/// ```
#[derive(Debug)]
pub struct SearchContext {
    /// Immutable precomputed data (Tier 1)
    pub memo: MemoizedData,
    pub params: SearchParams,
    /// Trail for backtracking (Tier 2)
    pub trail: Trail,
    /// Mutable search state (Tier 2)
    pub state: DynamicState,
    pub statistics: PrunerCounters,
}

impl SearchContext {
    /// Create a new search context, computing MEMO data for `dimension`.
    pub fn new(dimension: usize, params: SearchParams) -> Result<Self> {
        Ok(Self::with_memo(MemoizedData::new(dimension)?, params))
    }

    /// Create a search context with existing MEMO data.
    pub fn with_memo(memo: MemoizedData, params: SearchParams) -> Self {
        let state = DynamicState::new(&memo);
        Self {
            memo,
            params,
            trail: Trail::new(),
            state,
            statistics: PrunerCounters::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.memo.dimension()
    }

    /// Replace the live object, forgetting the trail.
    ///
    /// # Panics
    ///
    /// Panics if `object` has a different dimension from the context.
    pub fn load(&mut self, object: PartialObject) {
        assert_eq!(object.dimension(), self.dimension(), "object dimension");
        self.trail.clear();
        self.state.object = object;
    }

    /// Undo every change made since `checkpoint`.
    pub fn rewind_to(&mut self, checkpoint: usize) {
        self.trail.rewind_to(checkpoint, &mut self.state.object);
    }

    /// Close the live object from scratch.
    pub fn close(&mut self) -> std::result::Result<(), ClosureFailure> {
        propagation::close(
            &self.memo.cube,
            &mut self.state.object,
            &mut self.trail,
            self.params.degree,
            self.params.rules,
        )
    }

    /// Decide one vertex and propagate.
    pub fn decide(&mut self, vertex: Vertex, status: Status) -> std::result::Result<(), ClosureFailure> {
        propagation::propagate_choice(
            &self.memo.cube,
            &mut self.state.object,
            &mut self.trail,
            self.params.degree,
            self.params.rules,
            vertex,
            status,
        )
    }

    /// Run the active pruners on the live object.
    pub fn prune(&self) -> std::result::Result<(), Pruner> {
        self.params.pruners.check(&self.memo.cube, &self.state.object)
    }

    /// Close or decide, then prune, counting whichever rule rejects the
    /// object. Returns whether the object survived.
    pub fn accept(&mut self, closed: std::result::Result<(), ClosureFailure>) -> bool {
        if let Err(failure) = closed {
            trace!(kind = failure.kind(), %failure, "closure pruned");
            self.statistics.increment(Pruner::Closure);
            return false;
        }
        match self.prune() {
            Ok(()) => true,
            Err(pruner) => {
                trace!(pruner = %pruner, "pruned");
                self.statistics.increment(pruner);
                false
            }
        }
    }

    /// Record the live object as an output. It must be fully decided.
    pub fn emit(&mut self) {
        debug_assert!(self.state.object.is_complete());
        let found = self.state.object.feasible_set();
        self.state.outputs.push(found);
    }

    /// Outputs found since the last call.
    pub fn take_outputs(&mut self) -> Vec<VertexSet> {
        std::mem::take(&mut self.state.outputs)
    }
}
