// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Vertex type for the Boolean n-cube.
//!
//! A vertex is a bit-vector of length `dimension`, stored as the low bits of a
//! `u32`: bit i holds coordinate i. The dimension is not stored in the vertex;
//! operations that depend on it take it as an argument.
//!
//! # Examples
//!
//! ```
//! use nonpolar_search::geometry::Vertex;
//!
//! let v = Vertex::parse("011").unwrap();
//! assert_eq!(v.bits(), 3);
//! assert_eq!(v.antipodal(3).to_bitstring(3), "100");
//! assert_eq!(v.neighbors(3).count(), 3);
//! ```

use std::fmt;

use crate::error::{Result, SearchError};
use crate::geometry::MAX_DIMENSION;

/// Bit mask with the low `dimension` bits set.
pub const fn full_mask(dimension: usize) -> u32 {
    (1u32 << dimension) - 1
}

/// A vertex of the n-cube.
///
/// Ordering is numeric, which is the order used for lexicographic comparison of
/// sorted vertex lists in canonical forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vertex(u32);

impl Vertex {
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Position of this vertex in per-vertex tables.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The bitwise complement within the given dimension.
    pub const fn antipodal(self, dimension: usize) -> Self {
        Self(self.0 ^ full_mask(dimension))
    }

    /// The neighbor across `coordinate`.
    pub const fn flip(self, coordinate: usize) -> Self {
        Self(self.0 ^ (1 << coordinate))
    }

    /// Value of one coordinate.
    pub const fn coordinate(self, coordinate: usize) -> bool {
        (self.0 >> coordinate) & 1 != 0
    }

    /// All vertices at Hamming distance 1, by increasing coordinate.
    pub fn neighbors(self, dimension: usize) -> impl Iterator<Item = Vertex> {
        (0..dimension).map(move |coordinate| self.flip(coordinate))
    }

    /// Drop `coordinate`, shifting the higher coordinates down by one.
    pub const fn remove_coordinate(self, coordinate: usize) -> Self {
        let low = self.0 & ((1 << coordinate) - 1);
        let high = (self.0 >> (coordinate + 1)) << coordinate;
        Self(low | high)
    }

    /// Insert `value` at `coordinate`, shifting the higher coordinates up.
    ///
    /// Inverse of [`Vertex::remove_coordinate`].
    pub const fn insert_coordinate(self, coordinate: usize, value: bool) -> Self {
        let low = self.0 & ((1 << coordinate) - 1);
        let high = (self.0 >> coordinate) << (coordinate + 1);
        Self(low | high | ((value as u32) << coordinate))
    }

    /// Bitstring with the highest coordinate first, e.g. `"011"`.
    pub fn to_bitstring(self, dimension: usize) -> String {
        (0..dimension)
            .rev()
            .map(|coordinate| if self.coordinate(coordinate) { '1' } else { '0' })
            .collect()
    }

    /// Parse a bitstring written highest coordinate first.
    ///
    /// The dimension is the length of the string.
    pub fn parse(text: &str) -> Result<Self> {
        let dimension = text.len();
        let invalid = || SearchError::InvalidBitstring {
            text: text.to_string(),
            dimension,
        };
        if dimension == 0 || dimension > MAX_DIMENSION {
            return Err(invalid());
        }
        let mut bits = 0u32;
        for c in text.chars() {
            bits = (bits << 1)
                | match c {
                    '0' => 0,
                    '1' => 1,
                    _ => return Err(invalid()),
                };
        }
        Ok(Self(bits))
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
