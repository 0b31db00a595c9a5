// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Failure values for constraint propagation.

use strum_macros::{EnumCount as EnumCountMacro, IntoStaticStr};
use thiserror::Error;

use crate::geometry::Vertex;

/// Why a closure pruned the current object.
///
/// These are ordinary outcomes of search, never surfaced to callers as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, EnumCountMacro, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ClosureFailure {
    /// Two antipodal vertices are both Feasible.
    #[error("antipodal vertices {vertex} and {antipode} are both feasible")]
    AntipodalConflict { vertex: Vertex, antipode: Vertex },

    /// Two antipodal vertices are both Infeasible where one must be Feasible.
    #[error("antipodal vertices {vertex} and {antipode} are both infeasible")]
    AntipodalVoid { vertex: Vertex, antipode: Vertex },

    /// An Infeasible vertex has too many Infeasible neighbors.
    #[error("infeasible vertex {vertex} has {degree} infeasible neighbors (max {bound})")]
    DegreeOverflow {
        vertex: Vertex,
        degree: usize,
        bound: usize,
    },

    /// An Infeasible vertex can no longer reach its required degree.
    #[error("infeasible vertex {vertex} can reach at most {possible} infeasible neighbors (needs {bound})")]
    DegreeDeficit {
        vertex: Vertex,
        possible: usize,
        bound: usize,
    },
}

impl ClosureFailure {
    /// Short name of the violated rule, for logs.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}
