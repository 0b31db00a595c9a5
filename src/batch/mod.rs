// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Batched search over embedded seeds.
//!
//! A run stamps its seeds once, then splits the stamped list into contiguous
//! batches with [`partition`]. Each batch searches its seeds in stamp order in
//! one [`SearchContext`], deduplicates what it finds, and reports outputs,
//! pruner counts and per-seed timings. Batches share nothing mutable; their
//! reports are joined by [`dedup::merge_reports`].

pub mod dedup;

pub use dedup::{filter_isomorphic, merge_reports, Deduplicator, MergedReport};

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::Config;
use crate::context::{MemoizedData, SearchContext, SearchParams};
use crate::error::{check_degree, check_dimension, Result, SearchError};
use crate::geometry::VertexSet;
use crate::predicates::exhaustive_program;
use crate::propagation::ClosureRules;
use crate::pruners::PrunerSet;
use crate::seeds::EmbeddedSeed;
use crate::state::PrunerCounters;

/// The `take` seeds starting at `skip`.
pub fn partition(seeds: &[EmbeddedSeed], skip: usize, take: usize) -> Result<&[EmbeddedSeed]> {
    let out_of_bounds = SearchError::BatchRangeOutOfBounds {
        skip,
        take,
        len: seeds.len(),
    };
    let end = skip.checked_add(take).ok_or(out_of_bounds.clone())?;
    seeds.get(skip..end).ok_or(out_of_bounds)
}

/// One non-polar object, with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub vertices: VertexSet,
    /// Stamp of the seed whose search found it.
    pub seed: u64,
    pub batch: usize,
}

/// How long one seed's search took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedTiming {
    pub stamp: u64,
    pub elapsed: Duration,
    /// Objects found from this seed, before deduplication.
    pub outputs: usize,
}

/// Everything one batch produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub batch_id: usize,
    pub dimension: usize,
    pub degree: usize,
    pub config: Config,
    /// One object per isomorphism class, in stamp then discovery order.
    pub outputs: Vec<Output>,
    pub counters: PrunerCounters,
    pub timings: Vec<SeedTiming>,
}

impl BatchReport {
    pub fn vertex_sets(&self) -> Vec<VertexSet> {
        self.outputs.iter().map(|output| output.vertices.clone()).collect()
    }
}

/// Search every seed of a batch for non-polar objects whose Infeasible
/// vertices have at most `degree` Infeasible neighbors.
pub fn generate(
    batch_id: usize,
    degree: usize,
    dimension: usize,
    config: &Config,
    seeds: &[EmbeddedSeed],
) -> Result<BatchReport> {
    run_batch(batch_id, degree, dimension, config, seeds, ClosureRules::STRICT)
}

/// As [`generate`], restricted to half-dense regular objects: exactly one
/// vertex of each antipodal pair is Feasible, and every Infeasible vertex
/// has exactly `degree` Infeasible neighbors.
pub fn half_dense_regular_generate(
    batch_id: usize,
    degree: usize,
    dimension: usize,
    config: &Config,
    seeds: &[EmbeddedSeed],
) -> Result<BatchReport> {
    run_batch(
        batch_id,
        degree,
        dimension,
        config,
        seeds,
        ClosureRules::HALF_DENSE_REGULAR,
    )
}

fn run_batch(
    batch_id: usize,
    degree: usize,
    dimension: usize,
    config: &Config,
    seeds: &[EmbeddedSeed],
    rules: ClosureRules,
) -> Result<BatchReport> {
    check_dimension(dimension)?;
    check_degree(degree, dimension)?;
    for seed in seeds {
        seed.validate(dimension)?;
    }

    info!(
        batch_id,
        dimension,
        degree,
        %config,
        seeds = seeds.len(),
        "batch started"
    );
    let memo = MemoizedData::new(dimension)?;
    let mut dedup = Deduplicator::with_group(memo.symmetry.clone());
    let params = SearchParams {
        degree,
        rules,
        pruners: PrunerSet::from_config(config),
    };
    let mut ctx = SearchContext::with_memo(memo, params);

    let mut outputs = Vec::new();
    let mut timings = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let start = Instant::now();
        ctx.load(seed.object().clone());
        let suspended = exhaustive_program().search(&mut ctx);
        debug_assert!(suspended.is_none(), "program ends in Fail");
        let found = ctx.take_outputs();
        let elapsed = start.elapsed();
        debug!(
            stamp = seed.stamp(),
            outputs = found.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "seed searched"
        );
        timings.push(SeedTiming {
            stamp: seed.stamp(),
            elapsed,
            outputs: found.len(),
        });
        for vertices in found {
            if dedup.insert(&vertices)? {
                outputs.push(Output {
                    vertices,
                    seed: seed.stamp(),
                    batch: batch_id,
                });
            }
        }
    }

    info!(
        batch_id,
        outputs = outputs.len(),
        counters = %ctx.statistics,
        "batch finished"
    );
    Ok(BatchReport {
        batch_id,
        dimension,
        degree,
        config: *config,
        outputs,
        counters: ctx.statistics,
        timings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::{generate_seeds, stamp_embed};
    use crate::state::Pruner;

    fn square_seeds_in(dimension: usize) -> Vec<EmbeddedSeed> {
        let seeds = generate_seeds(2, 2).unwrap();
        stamp_embed(2, 2, dimension, &seeds).unwrap()
    }

    #[test]
    fn test_partition() {
        let seeds = square_seeds_in(3);
        assert_eq!(partition(&seeds, 0, 6).unwrap().len(), 6);
        let middle = partition(&seeds, 2, 3).unwrap();
        assert_eq!(middle[0].stamp(), 3);
        assert_eq!(middle.len(), 3);
        assert!(partition(&seeds, 6, 0).unwrap().is_empty());
        assert_eq!(
            partition(&seeds, 4, 3),
            Err(SearchError::BatchRangeOutOfBounds {
                skip: 4,
                take: 3,
                len: 6
            })
        );
        assert!(partition(&seeds, 1, usize::MAX).is_err());
    }

    #[test]
    fn test_generate_in_dimension_three() {
        let seeds = square_seeds_in(3);
        let report = generate(1, 3, 3, &Config::default(), &seeds).unwrap();
        assert_eq!(report.outputs.len(), 3);
        assert_eq!(report.counters.get(Pruner::Cover), 7);
        assert_eq!(report.counters.total(), 7);
        let raw: Vec<usize> = report.timings.iter().map(|t| t.outputs).collect();
        assert_eq!(raw, vec![0, 2, 0, 3, 1, 0]);
        let stamps: Vec<u64> = report.outputs.iter().map(|o| o.seed).collect();
        assert_eq!(stamps, vec![2, 2, 4]);
        assert!(report.outputs.iter().all(|o| o.batch == 1));
    }

    #[test]
    fn test_lower_degree_prunes_by_closure() {
        let seeds = square_seeds_in(3);
        let report = generate(1, 2, 3, &Config::default(), &seeds).unwrap();
        assert_eq!(
            report.vertex_sets(),
            vec![VertexSet::from_bitstrings(3, ["001", "010", "100", "111"]).unwrap()]
        );
        assert_eq!(report.counters.get(Pruner::Closure), 4);
        assert_eq!(report.counters.get(Pruner::Cover), 3);
    }

    #[test]
    fn test_generate_with_critical_required() {
        let seeds = square_seeds_in(3);
        let config: Config = "cnp".parse().unwrap();
        let report = generate(1, 3, 3, &config, &seeds).unwrap();
        assert_eq!(
            report.vertex_sets(),
            vec![VertexSet::from_bitstrings(3, ["001", "010", "100", "111"]).unwrap()]
        );
        assert_eq!(report.counters.get(Pruner::Cover), 3);
        assert_eq!(report.counters.get(Pruner::Critical), 4);
    }

    #[test]
    fn test_generate_validates_before_searching() {
        let seeds = square_seeds_in(3);
        assert!(matches!(
            generate(1, 4, 3, &Config::default(), &seeds),
            Err(SearchError::DegreeExceedsDimension { .. })
        ));
        assert!(matches!(
            generate(1, 3, 4, &Config::default(), &seeds),
            Err(SearchError::EmbeddedDimensionMismatch { stamp: 1, .. })
        ));
    }

    #[test]
    fn test_empty_batch() {
        let report = generate(7, 1, 3, &Config::default(), &[]).unwrap();
        assert!(report.outputs.is_empty());
        assert!(report.timings.is_empty());
        assert_eq!(report.counters.total(), 0);
        assert_eq!(report.batch_id, 7);
    }

    #[test]
    fn test_half_dense_in_small_dimensions() {
        for (dimension, degree) in [(3, 2), (3, 3), (4, 2), (4, 3)] {
            let seeds = square_seeds_in(dimension);
            let report =
                half_dense_regular_generate(1, degree, dimension, &Config::default(), &seeds).unwrap();
            assert!(report.outputs.is_empty(), "n={dimension} d={degree}");
        }
    }
}
