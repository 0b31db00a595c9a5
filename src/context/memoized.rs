// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Immutable precomputed data (Tier 1: MEMO).

use tracing::debug;

use crate::error::Result;
use crate::geometry::Hypercube;
use crate::symmetry::SymmetryGroup;

/// Immutable precomputed data for one dimension.
///
/// Computed once and never changed during search. Batches each take their
/// own copy; the largest group table (dimension 6, 46080 elements) is well
/// under a megabyte.
#[derive(Debug, Clone)]
pub struct MemoizedData {
    /// Adjacency of the n-cube.
    pub cube: Hypercube,

    /// All n!·2^n symmetries, used for canonical forms.
    pub symmetry: SymmetryGroup,
}

impl MemoizedData {
    pub fn new(dimension: usize) -> Result<Self> {
        let cube = Hypercube::new(dimension)?;
        let symmetry = SymmetryGroup::new(dimension)?;
        debug!(
            dimension,
            vertices = cube.vertex_count(),
            symmetries = symmetry.order(),
            "memoized data initialized"
        );
        Ok(Self { cube, symmetry })
    }

    pub fn dimension(&self) -> usize {
        self.cube.dimension()
    }
}
