// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Symmetry of the n-cube: coordinate permutations combined with
//! complementations.
//!
//! ## Module Structure
//!
//! - `canonical`: group construction, canonical forms and isomorphism
//! - `mod`: Public API and re-exports

pub mod canonical;

pub use canonical::{canonical_form, GroupElement, SymmetryGroup};
