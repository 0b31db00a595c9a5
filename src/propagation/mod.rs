// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Closure: constraint propagation to a fixed point.
//!
//! # Algorithm Overview
//!
//! Work proceeds from a queue of vertices whose status has just been decided.
//! For each vertex taken from the queue:
//! 1. Apply the antipodal rule to it and its antipode
//! 2. If it is Infeasible, check its own degree
//! 3. Check the degree of each Infeasible neighbor, since its count may have grown
//!
//! Every forced decision goes back onto the queue. The closure either reaches
//! a fixed point or fails with a [`ClosureFailure`].
//!
//! # Rule Variants
//!
//! One algorithm serves all three searches; [`ClosureRules`] selects which
//! constraints apply:
//!
//! | variant              | antipodal rule           | degree rule |
//! |----------------------|--------------------------|-------------|
//! | `SEED`               | none                     | at most d   |
//! | `STRICT`             | at most one Feasible     | at most d   |
//! | `HALF_DENSE_REGULAR` | exactly one Feasible     | exactly d   |
//!
//! Seeds are relaxed: a sub-cube of the target holds no antipodal pair of the
//! target, so only the degree constraint carries over.

pub mod errors;

pub use errors::ClosureFailure;

use std::collections::VecDeque;

use crate::geometry::{Hypercube, Vertex, MAX_DIMENSION};
use crate::state::{PartialObject, Status};
use crate::trail::Trail;

/// How antipodal pairs are constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntipodalRule {
    Unconstrained,
    AtMostOneFeasible,
    ExactlyOneFeasible,
}

/// How the Infeasible neighbors of an Infeasible vertex are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeRule {
    AtMost,
    Exactly,
}

/// The rule set of one closure variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosureRules {
    pub antipodal: AntipodalRule,
    pub degree: DegreeRule,
}

impl ClosureRules {
    /// Degree-bounded only; used to generate seeds.
    pub const SEED: ClosureRules = ClosureRules {
        antipodal: AntipodalRule::Unconstrained,
        degree: DegreeRule::AtMost,
    };

    /// Strictly non-polar search.
    pub const STRICT: ClosureRules = ClosureRules {
        antipodal: AntipodalRule::AtMostOneFeasible,
        degree: DegreeRule::AtMost,
    };

    /// Half-dense degree-regular search.
    pub const HALF_DENSE_REGULAR: ClosureRules = ClosureRules {
        antipodal: AntipodalRule::ExactlyOneFeasible,
        degree: DegreeRule::Exactly,
    };
}

/// Close an object from scratch: every decided vertex is reconsidered.
///
/// Forced decisions are recorded on `trail`. On failure the object is left
/// partially tightened; the caller rewinds.
pub fn close(
    cube: &Hypercube,
    object: &mut PartialObject,
    trail: &mut Trail,
    degree: usize,
    rules: ClosureRules,
) -> Result<(), ClosureFailure> {
    let queue = object.decided_vertices().collect();
    Worklist {
        cube,
        object,
        trail,
        degree,
        rules,
        queue,
    }
    .run()
}

/// Decide `vertex` and close incrementally from that single change.
///
/// The object must already be closed before the call.
pub fn propagate_choice(
    cube: &Hypercube,
    object: &mut PartialObject,
    trail: &mut Trail,
    degree: usize,
    rules: ClosureRules,
    vertex: Vertex,
    status: Status,
) -> Result<(), ClosureFailure> {
    let mut worklist = Worklist {
        cube,
        object,
        trail,
        degree,
        rules,
        queue: VecDeque::new(),
    };
    worklist.decide(vertex, status);
    worklist.run()
}

struct Worklist<'a> {
    cube: &'a Hypercube,
    object: &'a mut PartialObject,
    trail: &'a mut Trail,
    degree: usize,
    rules: ClosureRules,
    queue: VecDeque<Vertex>,
}

impl Worklist<'_> {
    fn decide(&mut self, v: Vertex, status: Status) {
        self.object.set(self.trail, v, status);
        self.queue.push_back(v);
    }

    fn run(&mut self) -> Result<(), ClosureFailure> {
        while let Some(v) = self.queue.pop_front() {
            self.check_antipode(v)?;
            if self.object.is_infeasible(v) {
                self.check_degree(v)?;
            }
            let cube = self.cube;
            for &u in cube.neighbors(v) {
                if self.object.is_infeasible(u) {
                    self.check_degree(u)?;
                }
            }
        }
        Ok(())
    }

    fn check_antipode(&mut self, v: Vertex) -> Result<(), ClosureFailure> {
        let antipode = self.cube.antipodal(v);
        match (self.rules.antipodal, self.object.status(v), self.object.status(antipode)) {
            (AntipodalRule::Unconstrained, _, _) => Ok(()),
            (_, Status::Feasible, Status::Feasible) => Err(ClosureFailure::AntipodalConflict {
                vertex: v,
                antipode,
            }),
            (_, Status::Feasible, Status::Undecided) => {
                self.decide(antipode, Status::Infeasible);
                Ok(())
            }
            (AntipodalRule::ExactlyOneFeasible, Status::Infeasible, Status::Infeasible) => {
                Err(ClosureFailure::AntipodalVoid {
                    vertex: v,
                    antipode,
                })
            }
            (AntipodalRule::ExactlyOneFeasible, Status::Infeasible, Status::Undecided) => {
                self.decide(antipode, Status::Feasible);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Degree bookkeeping for one Infeasible vertex.
    fn check_degree(&mut self, v: Vertex) -> Result<(), ClosureFailure> {
        let mut infeasible = 0;
        let mut undecided = [Vertex::new(0); MAX_DIMENSION];
        let mut undecided_len = 0;
        for &u in self.cube.neighbors(v) {
            match self.object.status(u) {
                Status::Infeasible => infeasible += 1,
                Status::Undecided => {
                    undecided[undecided_len] = u;
                    undecided_len += 1;
                }
                Status::Feasible => {}
            }
        }
        let bound = self.degree;
        let exact = self.rules.degree == DegreeRule::Exactly;

        if infeasible > bound {
            return Err(ClosureFailure::DegreeOverflow {
                vertex: v,
                degree: infeasible,
                bound,
            });
        }
        if exact && infeasible + undecided_len < bound {
            return Err(ClosureFailure::DegreeDeficit {
                vertex: v,
                possible: infeasible + undecided_len,
                bound,
            });
        }
        // Saturated: the remaining neighbors must stay out.
        if infeasible == bound {
            for &u in &undecided[..undecided_len] {
                self.decide(u, Status::Feasible);
            }
        } else if exact && infeasible + undecided_len == bound {
            for &u in &undecided[..undecided_len] {
                self.decide(u, Status::Infeasible);
            }
        }
        Ok(())
    }
}
