// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Seeds: small fully decided objects that start every search.
//!
//! A seed is found by running the search engine itself in the seed dimension
//! with the relaxed closure ([`ClosureRules::SEED`]) and no pruners, then
//! keeping one representative per isomorphism class. Seeds are lifted into
//! the target dimension by an [`Embedder`], which also stamps them with
//! sequential identifiers.

use std::fmt;

use tracing::{debug, info};

use crate::batch::dedup::Deduplicator;
use crate::context::{MemoizedData, SearchContext, SearchParams};
use crate::error::{check_degree, check_dimension, Result, SearchError};
use crate::geometry::{full_mask, Vertex, VertexSet};
use crate::predicates::exhaustive_program;
use crate::propagation::ClosureRules;
use crate::pruners::PrunerSet;
use crate::state::{PartialObject, Status};

/// A fully decided object in the seed dimension, given by its Feasible
/// vertices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seed {
    feasible: VertexSet,
}

impl Seed {
    pub fn new(feasible: VertexSet) -> Self {
        Self { feasible }
    }

    pub fn dimension(&self) -> usize {
        self.feasible.dimension()
    }

    pub fn feasible(&self) -> &VertexSet {
        &self.feasible
    }

    pub fn to_object(&self) -> PartialObject {
        PartialObject::from_feasible(&self.feasible)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.feasible)
    }
}

/// A seed placed on a sub-cube of the target dimension.
///
/// The stamp is unique and increasing over one `stamp_embed` call. Only the
/// sub-cube is decided; every other vertex is Undecided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedSeed {
    stamp: u64,
    seed_dimension: usize,
    object: PartialObject,
}

impl EmbeddedSeed {
    /// Wrap an already embedded object.
    ///
    /// Nothing is checked here; searches validate their seeds before starting.
    pub fn new(stamp: u64, seed_dimension: usize, object: PartialObject) -> Self {
        Self {
            stamp,
            seed_dimension,
            object,
        }
    }

    pub fn stamp(&self) -> u64 {
        self.stamp
    }

    pub fn seed_dimension(&self) -> usize {
        self.seed_dimension
    }

    pub fn dimension(&self) -> usize {
        self.object.dimension()
    }

    pub fn object(&self) -> &PartialObject {
        &self.object
    }

    /// Check that this seed can start a search in `dimension`.
    ///
    /// The decided vertices must form exactly one sub-cube of the declared
    /// seed dimension.
    pub fn validate(&self, dimension: usize) -> Result<()> {
        if self.dimension() != dimension {
            return Err(SearchError::EmbeddedDimensionMismatch {
                stamp: self.stamp,
                expected: dimension,
                actual: self.dimension(),
            });
        }
        let decided = self.object.decided_count();
        let (any, all) = self
            .object
            .decided_vertices()
            .fold((0u32, full_mask(dimension)), |(any, all), v| {
                (any | v.bits(), all & v.bits())
            });
        let varying = (any ^ all).count_ones() as usize;
        let expected = 1usize << self.seed_dimension;
        if decided != expected || varying != self.seed_dimension {
            return Err(SearchError::EmbeddedSubcubeMismatch {
                stamp: self.stamp,
                seed_dimension: self.seed_dimension,
                decided,
                expected,
            });
        }
        Ok(())
    }
}

/// Lifts seeds of dimension m into dimension n.
///
/// Seed coordinates become the low m coordinates of the target; the n−m high
/// coordinates are clamped to `pattern`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Embedder {
    pattern: u32,
}

impl Embedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp the extra coordinates to `pattern` instead of all zeros.
    pub fn with_pattern(pattern: u32) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> u32 {
        self.pattern
    }

    /// Embed and stamp `seeds`, stamps starting at 1 in input order.
    ///
    /// `degree` is only checked against `target_dimension`; each search
    /// applies its own bound, which may be smaller.
    pub fn embed(
        &self,
        degree: usize,
        seed_dimension: usize,
        target_dimension: usize,
        seeds: &[Seed],
    ) -> Result<Vec<EmbeddedSeed>> {
        check_dimension(target_dimension)?;
        check_dimension(seed_dimension)?;
        if seed_dimension >= target_dimension {
            return Err(SearchError::SeedDimensionTooLarge {
                seed_dimension,
                target_dimension,
            });
        }
        check_degree(degree, target_dimension)?;
        let free_coordinates = target_dimension - seed_dimension;
        if self.pattern > full_mask(free_coordinates) {
            return Err(SearchError::EmbeddingPatternOutOfRange {
                pattern: self.pattern,
                free_coordinates,
            });
        }
        if let Some((index, seed)) = seeds
            .iter()
            .enumerate()
            .find(|(_, seed)| seed.dimension() != seed_dimension)
        {
            return Err(SearchError::SeedDimensionMismatch {
                index,
                expected: seed_dimension,
                actual: seed.dimension(),
            });
        }

        let offset = self.pattern << seed_dimension;
        let embedded = seeds
            .iter()
            .zip(1u64..)
            .map(|(seed, stamp)| {
                let mut object = PartialObject::new(target_dimension);
                for bits in 0..1u32 << seed_dimension {
                    let status = if seed.feasible.contains(Vertex::new(bits)) {
                        Status::Feasible
                    } else {
                        Status::Infeasible
                    };
                    object.assign(Vertex::new(bits | offset), status);
                }
                EmbeddedSeed::new(stamp, seed_dimension, object)
            })
            .collect::<Vec<_>>();
        debug!(
            count = embedded.len(),
            degree,
            seed_dimension,
            target_dimension,
            pattern = self.pattern,
            "seeds embedded"
        );
        Ok(embedded)
    }
}

/// All seeds of `dimension` for degree bound `degree`, one per isomorphism
/// class, in discovery order.
pub fn generate_seeds(degree: usize, dimension: usize) -> Result<Vec<Seed>> {
    check_dimension(dimension)?;
    check_degree(degree, dimension)?;

    let memo = MemoizedData::new(dimension)?;
    let mut dedup = Deduplicator::with_group(memo.symmetry.clone());
    let params = SearchParams {
        degree,
        rules: ClosureRules::SEED,
        pruners: PrunerSet::none(),
    };
    let mut ctx = SearchContext::with_memo(memo, params);
    let suspended = exhaustive_program().search(&mut ctx);
    debug_assert!(suspended.is_none(), "program ends in Fail");

    let found = ctx.take_outputs();
    let total = found.len();
    let mut seeds = Vec::new();
    for feasible in found {
        if dedup.insert(&feasible)? {
            seeds.push(Seed::new(feasible));
        }
    }
    info!(degree, dimension, total, classes = seeds.len(), "seeds generated");
    Ok(seeds)
}

/// Embed `seeds` into `target_dimension` with the default (all zeros)
/// clamping, stamping them from 1.
pub fn stamp_embed(
    degree: usize,
    seed_dimension: usize,
    target_dimension: usize,
    seeds: &[Seed],
) -> Result<Vec<EmbeddedSeed>> {
    Embedder::new().embed(degree, seed_dimension, target_dimension, seeds)
}
