// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Enumeration of non-polar vertex sets of the n-cube, up to symmetry.
//!
//! A vertex set of the n-cube is *non-polar* when it contains no antipodal
//! pair yet meets every facet. This crate enumerates such sets (the Feasible
//! vertices of a fully decided object) subject to a degree bound on the
//! Infeasible vertices, and reports one representative per orbit of the
//! hyperoctahedral group.
//!
//! # Architecture
//!
//! The implementation uses a two-tier memory model:
//!
//! ## Tier 1: MEMO Data (Immutable)
//!
//! Precomputed data that never changes during search:
//! - Neighbor tables of the n-cube
//! - The n!·2^n symmetries used for canonical forms
//!
//! ## Tier 2: DYNAMIC Data (Mutable)
//!
//! Search state that changes during search, tracked on the trail:
//! - Trail - records status changes for O(1) backtracking
//! - PartialObject - the status of every vertex
//!
//! # Search Algorithm
//!
//! A run proceeds in stages:
//!
//! 1. **Seeds**: [`generate_seeds`] enumerates small objects in a low
//!    dimension, one per isomorphism class
//! 2. **Embedding**: [`stamp_embed`] lifts them onto a sub-cube of the target
//!    dimension and stamps them
//! 3. **Batches**: [`generate`] (or [`half_dense_regular_generate`]) searches
//!    a contiguous slice of the stamped seeds, closing and pruning after every
//!    decision, and deduplicates what it finds
//! 4. **Merge**: [`merge_reports`] or [`filter_isomorphic`] joins batches
//!
//! # Parallelization
//!
//! Batches share only their read-only inputs. Each builds its own
//! [`SearchContext`], so batches may run on any executor and be joined after
//! they all complete.
//!
//! # Example
//!
//! ```
//! use nonpolar_search::{generate, generate_seeds, stamp_embed, Config};
//!
//! let seeds = generate_seeds(2, 2).unwrap();
//! let embedded = stamp_embed(2, 2, 3, &seeds).unwrap();
//! let report = generate(1, 3, 3, &Config::default(), &embedded).unwrap();
//! assert_eq!(report.outputs.len(), 3);
//! ```

pub mod batch;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod predicates;
pub mod propagation;
pub mod pruners;
pub mod report;
pub mod seeds;
pub mod state;
pub mod symmetry;
pub mod trail;

// Re-export commonly used types
pub use batch::{
    filter_isomorphic, generate, half_dense_regular_generate, merge_reports, partition, BatchReport,
    MergedReport, Output, SeedTiming,
};
pub use config::{Config, ConfigFlag};
pub use context::SearchContext;
pub use engine::{Predicate, PredicateResult, SearchEngine};
pub use error::{Result, SearchError};
pub use geometry::{Hypercube, Vertex, VertexSet};
pub use seeds::{generate_seeds, stamp_embed, EmbeddedSeed, Embedder, Seed};
pub use state::{PartialObject, Pruner, PrunerCounters, Status};
pub use symmetry::{canonical_form, SymmetryGroup};
pub use trail::Trail;
