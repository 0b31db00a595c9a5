// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Geometry of the Boolean n-cube.
//!
//! - Vertex: a bit-vector, with antipode, neighbors and coordinate surgery
//! - Hypercube: adjacency tables for one dimension
//! - VertexSet: sorted set of vertices, the form in which results are reported

pub mod cube;
pub mod vertex;

pub use cube::{Hypercube, VertexSet};
pub use vertex::{full_mask, Vertex};

/// Largest supported dimension.
///
/// Canonical forms are computed by brute force over a group of order
/// n!·2^n, which stays cheap up to here.
pub const MAX_DIMENSION: usize = 6;

/// Number of vertices of the largest supported cube.
pub const MAX_VERTICES: usize = 1 << MAX_DIMENSION;
