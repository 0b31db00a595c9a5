// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Properties every run must satisfy, whatever the counts.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{classes, run, square_seeds};
use nonpolar_search::context::{SearchContext, SearchParams};
use nonpolar_search::engine::EngineBuilder;
use nonpolar_search::predicates::{
    stepping_program, BranchPredicate, EmitPredicate, EnterPredicate, FailPredicate,
};
use nonpolar_search::propagation::ClosureRules;
use nonpolar_search::pruners::PrunerSet;
use nonpolar_search::{
    filter_isomorphic, generate, generate_seeds, merge_reports, partition, Config, Embedder,
    Hypercube, Predicate, PredicateResult, Status, SymmetryGroup, VertexSet,
};

/// No antipodal pair, every facet met, and at most `degree` Infeasible
/// neighbors around each Infeasible vertex.
fn assert_nonpolar(object: &VertexSet, degree: usize) {
    let n = object.dimension();
    let cube = Hypercube::new(n).unwrap();
    for v in object.iter() {
        assert!(!object.contains(cube.antipodal(v)), "{object}");
    }
    for coordinate in 0..n {
        for value in [false, true] {
            assert!(
                cube.facet(coordinate, value).any(|v| object.contains(v)),
                "{object} misses facet ({coordinate}, {value})"
            );
        }
    }
    for v in cube.vertices().filter(|&v| !object.contains(v)) {
        let infeasible = cube.neighbors(v).iter().filter(|&&u| !object.contains(u)).count();
        assert!(infeasible <= degree, "{object}");
    }
}

#[test]
fn test_outputs_are_nonpolar() {
    for (degree, dimension, flags) in [(3, 3, &[][..]), (3, 4, &["mnp"][..]), (3, 4, &[][..]), (2, 4, &[][..])] {
        let report = run(degree, dimension, flags, &square_seeds(2, 2, dimension));
        for output in &report.outputs {
            assert_nonpolar(&output.vertices, degree);
        }
    }
}

/// Branches like [`BranchPredicate`], checking every node that survives.
#[derive(Debug)]
struct CheckedBranch {
    inner: BranchPredicate,
    degree: usize,
    partial_nodes: Rc<Cell<usize>>,
}

impl CheckedBranch {
    fn check(&self, ctx: &SearchContext) {
        let object = &ctx.state.object;
        let n = object.dimension();
        let cube = Hypercube::new(n).unwrap();
        for v in object.vertices_with(Status::Feasible) {
            let antipode = cube.antipodal(v);
            assert!(!object.is_feasible(antipode), "antipodal pair at {}", v.to_bitstring(n));
        }
        for v in object.vertices_with(Status::Infeasible) {
            let degree = object.infeasible_degree(v);
            assert!(degree <= self.degree, "degree {degree} at {}", v.to_bitstring(n));
        }
        assert!(ctx.prune().is_ok());
        if !object.is_complete() {
            self.partial_nodes.set(self.partial_nodes.get() + 1);
        }
    }
}

impl Predicate for CheckedBranch {
    fn try_pred(&mut self, ctx: &mut SearchContext, round: usize) -> PredicateResult {
        self.check(ctx);
        self.inner.try_pred(ctx, round)
    }

    fn retry_pred(&mut self, ctx: &mut SearchContext, round: usize, choice: usize) -> PredicateResult {
        let result = self.inner.retry_pred(ctx, round, choice);
        if matches!(result, PredicateResult::SuccessSamePredicate) {
            self.check(ctx);
        }
        result
    }

    fn name(&self) -> &str {
        "CheckedBranch"
    }
}

#[test]
fn test_every_surviving_node_is_nonpolar_so_far() {
    for (degree, dimension, flags) in [(3, 3, &[][..]), (2, 4, &[][..]), (3, 4, &["mnp"][..])] {
        let params = SearchParams {
            degree,
            rules: ClosureRules::STRICT,
            pruners: PrunerSet::from_config(&Config::from_flags(flags).unwrap()),
        };
        let mut ctx = SearchContext::new(dimension, params).unwrap();
        let partial_nodes = Rc::new(Cell::new(0));
        for seed in square_seeds(2, 2, dimension) {
            ctx.load(seed.object().clone());
            let engine = EngineBuilder::new()
                .add(Box::new(EnterPredicate))
                .add(Box::new(CheckedBranch {
                    inner: BranchPredicate::new(),
                    degree,
                    partial_nodes: Rc::clone(&partial_nodes),
                }))
                .add(Box::new(EmitPredicate))
                .terminal(Box::new(FailPredicate))
                .build();
            assert!(engine.search(&mut ctx).is_none());
        }
        assert!(partial_nodes.get() > 0, "dimension {dimension} degree {degree}");
    }
}

#[test]
fn test_seeds_respect_their_degree() {
    for degree in 0..=3 {
        for seed in generate_seeds(degree, 3).unwrap() {
            let cube = Hypercube::new(3).unwrap();
            let feasible = seed.feasible();
            for v in cube.vertices().filter(|&v| !feasible.contains(v)) {
                let infeasible = cube.neighbors(v).iter().filter(|&&u| !feasible.contains(u)).count();
                assert!(infeasible <= degree, "{seed}");
            }
        }
    }
}

#[test]
fn test_search_never_changes_decided_vertices() {
    let seeds = square_seeds(2, 2, 3);
    let params = SearchParams {
        degree: 3,
        rules: ClosureRules::STRICT,
        pruners: PrunerSet::from_config(&Config::default()),
    };
    let mut ctx = SearchContext::new(3, params).unwrap();
    for seed in &seeds {
        ctx.load(seed.object().clone());
        let mut engine = stepping_program();
        let mut solutions = 0;
        while let Some(suspended) = engine.search(&mut ctx) {
            assert!(ctx.state.object.is_complete());
            for v in seed.object().decided_vertices() {
                assert_eq!(ctx.state.object.status(v), seed.object().status(v));
            }
            solutions += 1;
            engine = suspended;
        }
        // Exhaustion rewinds to the loaded seed.
        assert_eq!(&ctx.state.object, seed.object());
        let expected = [0, 2, 0, 3, 1, 0][seed.stamp() as usize - 1];
        assert_eq!(solutions, expected, "seed {}", seed.stamp());
    }
}

#[test]
fn test_deduplication_is_idempotent() {
    let report = run(3, 4, &[], &square_seeds(2, 2, 4));
    let once = report.vertex_sets();
    assert_eq!(filter_isomorphic(&once).unwrap(), once);
}

#[test]
fn test_isomorphism_is_symmetric_and_transitive() {
    let group = SymmetryGroup::new(4).unwrap();
    let report = run(3, 4, &[], &square_seeds(2, 2, 4));
    let a = &report.outputs[0].vertices;
    let images: Vec<VertexSet> = group
        .elements()
        .iter()
        .step_by(37)
        .take(3)
        .map(|g| VertexSet::new(4, g.image(a)).unwrap())
        .collect();
    let (b, c) = (&images[1], &images[2]);
    assert!(group.isomorphic(a, b) && group.isomorphic(b, a));
    assert!(group.isomorphic(b, c) && group.isomorphic(a, c));
    for other in &report.outputs[1..] {
        assert!(!group.isomorphic(a, &other.vertices));
        assert!(!group.isomorphic(&other.vertices, a));
    }
}

#[test]
fn test_batches_merge_to_the_whole() {
    let seeds = square_seeds(2, 2, 3);
    let config = Config::default();
    let whole = generate(0, 3, 3, &config, &seeds).unwrap();
    for split in 0..=seeds.len() {
        let first = generate(0, 3, 3, &config, partition(&seeds, 0, split).unwrap()).unwrap();
        let rest = partition(&seeds, split, seeds.len() - split).unwrap();
        let second = generate(1, 3, 3, &config, rest).unwrap();
        let merged = merge_reports(&[first, second]).unwrap();
        let merged: Vec<VertexSet> = merged.outputs.into_iter().map(|o| o.vertices).collect();
        assert_eq!(classes(&merged), classes(&whole.vertex_sets()), "split at {split}");
    }
}

#[test]
fn test_embedding_pattern_is_immaterial() {
    let seeds = generate_seeds(2, 2).unwrap();
    for (dimension, flags, expected) in [(3, &[][..], 3), (4, &["mnp"][..], 4), (4, &[][..], 5)] {
        let config = Config::from_flags(flags).unwrap();
        let mut results = Vec::new();
        for pattern in 0..1u32 << (dimension - 2) {
            let embedded = Embedder::with_pattern(pattern)
                .embed(2, 2, dimension, &seeds)
                .unwrap();
            let report = generate(1, 3, dimension, &config, &embedded).unwrap();
            assert_eq!(report.outputs.len(), expected);
            results.push(classes(&report.vertex_sets()));
        }
        assert!(results.windows(2).all(|w| w[0] == w[1]), "dimension {dimension}");
    }
}
