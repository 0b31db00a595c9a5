// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! EnterPredicate - closes the loaded object before branching.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};

/// Close the loaded object from scratch, then apply the pruners.
///
/// A seed that fails here counts against the rule that rejected it, the same
/// as any branch.
#[derive(Debug)]
pub struct EnterPredicate;

impl Predicate for EnterPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        let closed = ctx.close();
        if ctx.accept(closed) {
            PredicateResult::Success
        } else {
            PredicateResult::Failure
        }
    }

    fn name(&self) -> &str {
        "Enter"
    }
}
