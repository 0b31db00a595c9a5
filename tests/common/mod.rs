// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use nonpolar_search::context::SearchContext;
use nonpolar_search::geometry::VertexSet;
use nonpolar_search::state::PartialObject;
use nonpolar_search::{
    generate, generate_seeds, stamp_embed, BatchReport, Config, EmbeddedSeed, Predicate,
    PredicateResult, SymmetryGroup,
};

/// Parse a vertex set from bitstrings.
pub fn set(dimension: usize, bitstrings: &[&str]) -> VertexSet {
    VertexSet::from_bitstrings(dimension, bitstrings).unwrap()
}

/// The seeds of the square for `seed_degree`, stamped into `dimension` for
/// searches at `degree`.
pub fn square_seeds(seed_degree: usize, degree: usize, dimension: usize) -> Vec<EmbeddedSeed> {
    let seeds = generate_seeds(seed_degree, 2).unwrap();
    stamp_embed(degree, 2, dimension, &seeds).unwrap()
}

/// Run one batch with string flags.
pub fn run(degree: usize, dimension: usize, flags: &[&str], seeds: &[EmbeddedSeed]) -> BatchReport {
    let config = Config::from_flags(flags).unwrap();
    generate(1, degree, dimension, &config, seeds).unwrap()
}

/// Sorted canonical forms, for comparing result sets up to isomorphism.
pub fn classes(sets: &[VertexSet]) -> Vec<VertexSet> {
    let Some(first) = sets.first() else {
        return Vec::new();
    };
    let group = SymmetryGroup::new(first.dimension()).unwrap();
    let mut forms: Vec<VertexSet> = sets.iter().map(|s| group.canonical_form(s)).collect();
    forms.sort();
    forms
}

/// A predicate that loads a fixed object in place of whatever the context
/// holds, recording the change on the trail.
///
/// Used to start a search from a hand-built partial object without going
/// through the embedder.
#[derive(Debug)]
pub struct FixedObjectPredicate(pub PartialObject);

impl Predicate for FixedObjectPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        for v in self.0.decided_vertices() {
            if ctx.state.object.is_undecided(v) {
                ctx.state.object.set(&mut ctx.trail, v, self.0.status(v));
            } else if ctx.state.object.status(v) != self.0.status(v) {
                return PredicateResult::Failure;
            }
        }
        PredicateResult::Success
    }

    fn name(&self) -> &str {
        "FixedObject"
    }
}
