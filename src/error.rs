// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Errors reported before a search begins.
//!
//! Pruning is never an error: a pruned branch is simply counted. Everything in
//! this module is a rejected input, detected while validating arguments.

use thiserror::Error;

use crate::geometry::MAX_DIMENSION;

/// Invalid arguments to one of the public operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("dimension {dimension} is outside the supported range 1..={max}", max = MAX_DIMENSION)]
    DimensionOutOfRange { dimension: usize },

    #[error("degree bound {degree} exceeds dimension {dimension}")]
    DegreeExceedsDimension { degree: usize, dimension: usize },

    #[error("seed dimension {seed_dimension} must be smaller than target dimension {target_dimension}")]
    SeedDimensionTooLarge {
        seed_dimension: usize,
        target_dimension: usize,
    },

    #[error("seed #{index} has dimension {actual}, expected {expected}")]
    SeedDimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("embedded seed {stamp} has dimension {actual}, the run uses {expected}")]
    EmbeddedDimensionMismatch {
        stamp: u64,
        expected: usize,
        actual: usize,
    },

    #[error("embedded seed {stamp} decides {decided} vertices, a sub-cube of dimension {seed_dimension} has {expected}")]
    EmbeddedSubcubeMismatch {
        stamp: u64,
        seed_dimension: usize,
        decided: usize,
        expected: usize,
    },

    #[error("embedding pattern {pattern:#b} does not fit in {free_coordinates} free coordinates")]
    EmbeddingPatternOutOfRange { pattern: u32, free_coordinates: usize },

    #[error("batch range skip={skip} take={take} is outside a list of {len} seeds")]
    BatchRangeOutOfBounds { skip: usize, take: usize, len: usize },

    #[error("unknown config flag {0:?} (expected \"mnp\" or \"cnp\")")]
    UnknownConfigFlag(String),

    #[error("{text:?} is not a vertex of the {dimension}-cube")]
    InvalidBitstring { text: String, dimension: usize },
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Reject dimensions the search cannot represent.
pub(crate) fn check_dimension(dimension: usize) -> Result<()> {
    if (1..=MAX_DIMENSION).contains(&dimension) {
        Ok(())
    } else {
        Err(SearchError::DimensionOutOfRange { dimension })
    }
}

pub(crate) fn check_degree(degree: usize, dimension: usize) -> Result<()> {
    if degree > dimension {
        return Err(SearchError::DegreeExceedsDimension { degree, dimension });
    }
    Ok(())
}
