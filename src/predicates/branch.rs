// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! BranchPredicate - depth-first decision of Undecided vertices.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use crate::geometry::{Vertex, MAX_VERTICES};
use crate::state::Status;

/// Status tried for each choice: Infeasible first, then Feasible.
const CHOICES: [Status; 2] = [Status::Infeasible, Status::Feasible];

/// BranchPredicate decides one vertex per round.
///
/// 1. **try_pred(round)**:
///    - Find the Undecided vertex with the smallest index
///    - If none → Success (the object is fully decided)
///    - Store the vertex for this round, return Choices(2)
///
/// 2. **retry_pred(round, choice)**:
///    - Decide the stored vertex (choice 0: Infeasible, 1: Feasible)
///    - Propagate the decision, then run the pruners
///    - Return SuccessSamePredicate if the child survives, else Failure
///
/// Each round decides at least one vertex, so there are at most
/// [`MAX_VERTICES`] rounds.
#[derive(Debug)]
pub struct BranchPredicate {
    /// Vertex chosen at each round (indexed by round number).
    vertices_in_order: [Vertex; MAX_VERTICES],
}

impl BranchPredicate {
    pub fn new() -> Self {
        Self {
            vertices_in_order: [Vertex::new(0); MAX_VERTICES],
        }
    }
}

impl Default for BranchPredicate {
    fn default() -> Self {
        Self::new()
    }
}

impl Predicate for BranchPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, round: usize) -> PredicateResult {
        match ctx.state.object.first_undecided() {
            None => PredicateResult::Success,
            Some(vertex) => {
                self.vertices_in_order[round] = vertex;
                PredicateResult::Choices(CHOICES.len())
            }
        }
    }

    fn retry_pred(&mut self, ctx: &mut SearchContext, round: usize, choice: usize) -> PredicateResult {
        let vertex = self.vertices_in_order[round];
        let decided = ctx.decide(vertex, CHOICES[choice]);
        if ctx.accept(decided) {
            PredicateResult::SuccessSamePredicate
        } else {
            PredicateResult::Failure
        }
    }

    fn name(&self) -> &str {
        "Branch"
    }
}
