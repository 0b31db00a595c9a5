// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Canonical forms of vertex sets under the hyperoctahedral group.
//!
//! The group acting on the n-cube permutes coordinates and complements any
//! subset of them; it has n!·2^n elements. Two vertex sets are isomorphic when
//! some element maps one onto the other.
//!
//! The canonical form of a set is the lexicographically smallest sorted image
//! of the set over the whole group. This is brute force: every element is
//! applied to every vertex, which is why dimensions are capped at
//! [`MAX_DIMENSION`].

use crate::error::{check_dimension, Result};
use crate::geometry::{Vertex, VertexSet, MAX_DIMENSION};

/// One symmetry of the n-cube: permute coordinates, then complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupElement {
    /// Coordinate i of the source becomes coordinate `permutation[i]`.
    permutation: [u8; MAX_DIMENSION],
    /// Coordinates complemented after permuting.
    flips: u32,
}

impl GroupElement {
    pub fn apply(&self, v: Vertex, dimension: usize) -> Vertex {
        let mut bits = 0u32;
        for coordinate in 0..dimension {
            if v.coordinate(coordinate) {
                bits |= 1u32 << self.permutation[coordinate];
            }
        }
        Vertex::new(bits ^ self.flips)
    }

    /// Image of a whole set, sorted.
    pub fn image(&self, set: &VertexSet) -> Vec<Vertex> {
        let mut image: Vec<Vertex> = set
            .iter()
            .map(|v| self.apply(v, set.dimension()))
            .collect();
        image.sort_unstable();
        image
    }
}

/// All symmetries of one n-cube.
///
/// The first element is the identity.
#[derive(Debug, Clone)]
pub struct SymmetryGroup {
    dimension: usize,
    elements: Vec<GroupElement>,
}

impl SymmetryGroup {
    pub fn new(dimension: usize) -> Result<Self> {
        check_dimension(dimension)?;
        let mut permutation = [0u8; MAX_DIMENSION];
        for (i, slot) in permutation.iter_mut().enumerate() {
            *slot = i as u8;
        }
        let mut elements = Vec::with_capacity(order(dimension));
        loop {
            for flips in 0..1u32 << dimension {
                elements.push(GroupElement { permutation, flips });
            }
            if !next_permutation(&mut permutation[..dimension]) {
                break;
            }
        }
        Ok(Self {
            dimension,
            elements,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn order(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[GroupElement] {
        &self.elements
    }

    /// Lexicographically smallest sorted image of `set`.
    ///
    /// # Panics
    ///
    /// Panics if `set` belongs to a different dimension than the group.
    pub fn canonical_form(&self, set: &VertexSet) -> VertexSet {
        assert_eq!(
            set.dimension(),
            self.dimension,
            "canonical form of a {}-cube set under the {}-cube group",
            set.dimension(),
            self.dimension
        );
        let mut best = set.vertices().to_vec();
        for element in &self.elements[1..] {
            let image = element.image(set);
            if image < best {
                best = image;
            }
        }
        VertexSet::from_sorted(self.dimension, best)
    }

    /// Whether some symmetry maps `a` onto `b`.
    ///
    /// Sets of different dimensions are never isomorphic.
    pub fn isomorphic(&self, a: &VertexSet, b: &VertexSet) -> bool {
        if a.dimension() != b.dimension() || a.len() != b.len() {
            return false;
        }
        if a.dimension() != self.dimension {
            return false;
        }
        self.canonical_form(a) == self.canonical_form(b)
    }
}

/// n!·2^n
fn order(dimension: usize) -> usize {
    (1..=dimension).product::<usize>() << dimension
}

/// Advance to the next permutation in lexicographic order.
///
/// Returns false, leaving the slice unchanged, at the last permutation.
fn next_permutation(p: &mut [u8]) -> bool {
    if p.len() < 2 {
        return false;
    }
    let mut i = p.len() - 1;
    while i > 0 && p[i - 1] >= p[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = p.len() - 1;
    while p[j] <= p[i - 1] {
        j -= 1;
    }
    p.swap(i - 1, j);
    p[i..].reverse();
    true
}

/// Canonical form without keeping a group around.
pub fn canonical_form(set: &VertexSet) -> Result<VertexSet> {
    Ok(SymmetryGroup::new(set.dimension())?.canonical_form(set))
}
