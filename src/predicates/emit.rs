// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! EmitPredicate - records a fully decided object.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};

#[derive(Debug)]
pub struct EmitPredicate;

impl Predicate for EmitPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        ctx.emit();
        PredicateResult::Success
    }

    fn name(&self) -> &str {
        "Emit"
    }
}
