// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable search state (Tier 2: DYNAMIC).

use crate::geometry::VertexSet;
use crate::state::PartialObject;

use super::MemoizedData;

/// Mutable search state.
///
/// The object changes during search and every change is tracked on the trail.
/// Outputs are appended as they are found and are never rewound.
#[derive(Debug)]
pub struct DynamicState {
    /// The live search node.
    pub object: PartialObject,

    /// Fully decided objects found since the last `take_outputs`.
    pub outputs: Vec<VertexSet>,
}

impl DynamicState {
    /// Create initial dynamic state from MEMO data: everything Undecided.
    pub fn new(memo: &MemoizedData) -> Self {
        Self {
            object: PartialObject::new(memo.dimension()),
            outputs: Vec::new(),
        }
    }
}
