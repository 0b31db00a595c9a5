// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search predicates.
//!
//! Every search, seed generation included, runs the same program:
//!
//! ```text
//! Enter -> Branch -> Emit -> Fail
//! ```
//!
//! - `enter`: EnterPredicate closes and prunes the loaded object once
//! - `branch`: BranchPredicate decides one vertex per round
//! - `emit`: EmitPredicate records each fully decided object
//! - Built-in predicates: `FailPredicate`, `SuspendPredicate`
//!
//! Ending in Fail makes the engine backtrack through every branch.

pub mod branch;
pub mod emit;
pub mod enter;

pub use branch::BranchPredicate;
pub use emit::EmitPredicate;
pub use enter::EnterPredicate;

use crate::context::SearchContext;
use crate::engine::{EngineBuilder, Predicate, PredicateResult, SearchEngine, TerminalPredicate};

/// Built-in fail predicate (Prolog's `fail.`).
///
/// This predicate always fails, forcing backtracking. As the last predicate
/// of a program it makes the engine explore every alternative.
#[derive(Debug)]
pub struct FailPredicate;

impl Predicate for FailPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Fail"
    }
}

impl TerminalPredicate for FailPredicate {}

/// Built-in suspend predicate.
///
/// Pauses the engine with the search state intact; useful to inspect
/// solutions one at a time.
#[derive(Debug)]
pub struct SuspendPredicate;

impl Predicate for SuspendPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        PredicateResult::Suspend
    }

    fn name(&self) -> &str {
        "Suspend"
    }
}

impl TerminalPredicate for SuspendPredicate {}

/// The exhaustive program: enter, branch to completion, emit, fail.
pub fn exhaustive_program() -> SearchEngine {
    EngineBuilder::new()
        .add(Box::new(EnterPredicate))
        .add(Box::new(BranchPredicate::new()))
        .add(Box::new(EmitPredicate))
        .terminal(Box::new(FailPredicate))
        .build()
}

/// The same program, suspending at each fully decided object.
pub fn stepping_program() -> SearchEngine {
    EngineBuilder::new()
        .add(Box::new(EnterPredicate))
        .add(Box::new(BranchPredicate::new()))
        .terminal(Box::new(SuspendPredicate))
        .build()
}
