// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pruning rules applied to closed partial objects.
//!
//! Each rule asks whether a property is forced under every completion of the
//! object, treating Undecided vertices as possibly Feasible. The rules are
//! phrased in terms of the facets of the cube: the restriction `(i, b)` is the
//! sub-cube where coordinate `i` equals `b`.
//!
//! - *Intersecting*: some facet can no longer hold an antipodal pair (of its
//!   own antipodal map) and its Feasible vertices already avoid every facet of
//!   that facet. It then contains a smaller non-polar object.
//! - *Cover*: every vertex that may still be Feasible lies in one facet.
//! - *Minimal*: both facets across some coordinate lack antipodal pairs.
//! - *Critical*: some facet lacks an antipodal pair.
//!
//! The closure rule is counted alongside these but applied by
//! [`crate::propagation`].

use crate::config::Config;
use crate::geometry::{Hypercube, Vertex};
use crate::state::{PartialObject, Pruner, Status};

/// Which pruners are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrunerSet {
    pub intersecting: bool,
    pub cover: bool,
    pub minimal: bool,
    pub critical: bool,
}

impl PrunerSet {
    /// No pruning beyond closure; used to generate seeds.
    pub const fn none() -> Self {
        Self {
            intersecting: false,
            cover: false,
            minimal: false,
            critical: false,
        }
    }

    /// Intersecting and cover always, minimal and critical as configured.
    pub fn from_config(config: &Config) -> Self {
        Self {
            intersecting: true,
            cover: true,
            minimal: config.minimal_required,
            critical: config.critical_required,
        }
    }

    /// Apply the active pruners in order, returning the first that fires.
    pub fn check(&self, cube: &Hypercube, object: &PartialObject) -> Result<(), Pruner> {
        let n = cube.dimension();
        if self.intersecting {
            for coordinate in 0..n {
                for value in [false, true] {
                    if lacks_antipodal_pair(cube, object, coordinate, value)
                        && spans_facet(cube, object, coordinate, value)
                    {
                        return Err(Pruner::Intersecting);
                    }
                }
            }
        }
        if self.cover && covered_by_facet(cube, object) {
            return Err(Pruner::Cover);
        }
        if self.minimal
            && (0..n).any(|coordinate| {
                lacks_antipodal_pair(cube, object, coordinate, false)
                    && lacks_antipodal_pair(cube, object, coordinate, true)
            })
        {
            return Err(Pruner::Minimal);
        }
        if self.critical
            && (0..n).any(|coordinate| {
                lacks_antipodal_pair(cube, object, coordinate, false)
                    || lacks_antipodal_pair(cube, object, coordinate, true)
            })
        {
            return Err(Pruner::Critical);
        }
        Ok(())
    }
}

/// Every pair antipodal within facet `(coordinate, value)` has an Infeasible
/// member.
pub fn lacks_antipodal_pair(
    cube: &Hypercube,
    object: &PartialObject,
    coordinate: usize,
    value: bool,
) -> bool {
    cube.facet(coordinate, value).all(|v| {
        object.is_infeasible(v) || object.is_infeasible(cube.facet_antipodal(v, coordinate))
    })
}

/// For each other coordinate, the Feasible vertices of the facet take both
/// values.
pub fn spans_facet(cube: &Hypercube, object: &PartialObject, coordinate: usize, value: bool) -> bool {
    let (any, all) = fold_bits(
        cube.facet(coordinate, value)
            .filter(|&v| object.is_feasible(v)),
        cube.full_mask(),
    );
    let others = cube.full_mask() ^ (1 << coordinate);
    any & others == others && all & others == 0
}

/// Some facet contains every vertex that is not Infeasible.
pub fn covered_by_facet(cube: &Hypercube, object: &PartialObject) -> bool {
    let (any, all) = fold_bits(
        cube.vertices().filter(|&v| object.status(v) != Status::Infeasible),
        cube.full_mask(),
    );
    // A coordinate is constant over the set when it is set in every vertex
    // or clear in every vertex.
    all != 0 || any != cube.full_mask()
}

/// Bitwise OR and AND over a set of vertices; `(0, full)` for the empty set.
fn fold_bits(vertices: impl Iterator<Item = Vertex>, full: u32) -> (u32, u32) {
    vertices.fold((0, full), |(any, all), v| (any | v.bits(), all & v.bits()))
}
