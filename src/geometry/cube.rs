// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The n-cube itself, and sets of its vertices.

use std::fmt;

use crate::error::{check_dimension, Result, SearchError};
use crate::geometry::vertex::full_mask;
use crate::geometry::Vertex;

/// Precomputed adjacency for one dimension.
///
/// Built once per search context and never modified.
#[derive(Debug, Clone)]
pub struct Hypercube {
    dimension: usize,
    /// `neighbors[v]` lists the neighbors of vertex `v` by coordinate.
    neighbors: Vec<Vec<Vertex>>,
}

impl Hypercube {
    pub fn new(dimension: usize) -> Result<Self> {
        check_dimension(dimension)?;
        let neighbors = (0..1u32 << dimension)
            .map(|bits| Vertex::new(bits).neighbors(dimension).collect())
            .collect();
        Ok(Self {
            dimension,
            neighbors,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn vertex_count(&self) -> usize {
        1 << self.dimension
    }

    pub fn full_mask(&self) -> u32 {
        full_mask(self.dimension)
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> {
        (0..1u32 << self.dimension).map(Vertex::new)
    }

    pub fn neighbors(&self, v: Vertex) -> &[Vertex] {
        &self.neighbors[v.index()]
    }

    pub fn antipodal(&self, v: Vertex) -> Vertex {
        v.antipodal(self.dimension)
    }

    /// Vertices of the facet where `coordinate` equals `value`.
    pub fn facet(&self, coordinate: usize, value: bool) -> impl Iterator<Item = Vertex> {
        self.vertices()
            .filter(move |v| v.coordinate(coordinate) == value)
    }

    /// The antipode of `v` inside the facet fixing `coordinate`.
    ///
    /// Complements every other coordinate and keeps `coordinate` itself.
    pub fn facet_antipodal(&self, v: Vertex, coordinate: usize) -> Vertex {
        Vertex::new(v.bits() ^ (self.full_mask() ^ (1 << coordinate)))
    }
}

/// A set of vertices of one n-cube, kept sorted.
///
/// This is the representation of every output object: its Feasible vertices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexSet {
    dimension: usize,
    vertices: Vec<Vertex>,
}

impl VertexSet {
    /// Build a set, sorting and removing duplicates.
    ///
    /// Vertices outside the cube are rejected.
    pub fn new(dimension: usize, vertices: impl IntoIterator<Item = Vertex>) -> Result<Self> {
        check_dimension(dimension)?;
        let mut vertices: Vec<Vertex> = vertices.into_iter().collect();
        if let Some(bad) = vertices.iter().find(|v| v.bits() > full_mask(dimension)) {
            return Err(SearchError::InvalidBitstring {
                text: format!("{:b}", bad.bits()),
                dimension,
            });
        }
        vertices.sort_unstable();
        vertices.dedup();
        Ok(Self {
            dimension,
            vertices,
        })
    }

    /// Build a set from already sorted, distinct vertices of a valid cube.
    pub(crate) fn from_sorted(dimension: usize, vertices: Vec<Vertex>) -> Self {
        debug_assert!(vertices.windows(2).all(|w| w[0] < w[1]));
        Self {
            dimension,
            vertices,
        }
    }

    /// Parse bitstrings such as `"011"`, each of length `dimension`.
    ///
    /// ```
    /// use nonpolar_search::geometry::VertexSet;
    ///
    /// let set = VertexSet::from_bitstrings(3, ["111", "001"]).unwrap();
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(set.to_string(), "001 111");
    /// ```
    pub fn from_bitstrings<I, S>(dimension: usize, bitstrings: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vertices = bitstrings
            .into_iter()
            .map(|text| {
                let text = text.as_ref();
                if text.len() != dimension {
                    return Err(SearchError::InvalidBitstring {
                        text: text.to_string(),
                        dimension,
                    });
                }
                Vertex::parse(text)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(dimension, vertices)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, v: Vertex) -> bool {
        self.vertices.binary_search(&v).is_ok()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn iter(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.vertices.iter().copied()
    }

    pub fn to_bitstrings(&self) -> Vec<String> {
        self.iter().map(|v| v.to_bitstring(self.dimension)).collect()
    }
}

/// Space separated bitstrings, in increasing order.
impl fmt::Display for VertexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bitstrings().join(" "))
    }
}
