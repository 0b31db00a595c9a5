// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Non-deterministic search engine.
//!
//! This module implements a backtracking search engine that runs predicates
//! in sequence. The engine keeps an explicit stack of predicate activations
//! instead of recursing, and restores the search state through the trail.
//!
//! # Architecture
//!
//! Each stack entry tracks:
//! - Which predicate is executing
//! - Current round number (for predicates that execute multiple times)
//! - Choice mode state (whether we're trying alternatives)
//! - Current choice index (when in choice mode)
//! - The trail checkpoint to rewind to before each call
//!
//! Execution:
//! 1. Call try_pred(round) on each predicate
//! 2. If Success: advance to next predicate
//! 3. If SuccessSamePredicate: increment round, stay at same predicate
//! 4. If Choices(n): enter choice mode, call retry_pred(round, 0..n-1)
//! 5. If Failure: backtrack to the most recent entry with choices left
//!    (entries that succeeded deterministically have none)
//! 6. If Suspend: pause and return control to caller
//!
//! # Example
//!
//! ```
//! use nonpolar_search::context::{SearchContext, SearchParams};
//! use nonpolar_search::engine::EngineBuilder;
//! use nonpolar_search::predicates::{BranchPredicate, EmitPredicate, EnterPredicate, FailPredicate};
//! use nonpolar_search::propagation::ClosureRules;
//! use nonpolar_search::pruners::PrunerSet;
//!
//! let params = SearchParams { degree: 1, rules: ClosureRules::SEED, pruners: PrunerSet::none() };
//! let mut ctx = SearchContext::new(2, params).unwrap();
//! let engine = EngineBuilder::new()
//!     .add(Box::new(EnterPredicate))
//!     .add(Box::new(BranchPredicate::new()))
//!     .add(Box::new(EmitPredicate))
//!     .terminal(Box::new(FailPredicate))
//!     .build();
//!
//! // A program ending in Fail explores every branch, then is exhausted.
//! assert!(engine.search(&mut ctx).is_none());
//! assert!(!ctx.take_outputs().is_empty());
//! ```

pub mod predicate;

pub use predicate::{Predicate, PredicateResult, TerminalPredicate};

use crate::context::SearchContext;

/// Stack entry tracking the state of one predicate execution.
#[derive(Debug)]
struct StackEntry {
    /// Index of the predicate in the predicates list.
    predicate_index: usize,

    /// Current round number (incremented by SuccessSamePredicate).
    round: usize,

    /// Whether we're in choice mode (exploring alternatives).
    in_choice_mode: bool,

    /// Current choice being tried (when in_choice_mode is true).
    current_choice: usize,

    /// Total number of choices (when in_choice_mode is true).
    num_choices: usize,

    /// Trail checkpoint for this stack entry.
    trail_checkpoint: usize,
}

impl StackEntry {
    fn new(predicate_index: usize, round: usize, trail_checkpoint: usize) -> Self {
        Self {
            predicate_index,
            round,
            in_choice_mode: false,
            current_choice: 0,
            num_choices: 0,
            trail_checkpoint,
        }
    }
}

/// Builds a [`SearchEngine`] whose program is guaranteed to end with a
/// terminal predicate.
#[derive(Debug, Default)]
pub struct EngineBuilder {
    predicates: Vec<Box<dyn Predicate>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate to the program.
    pub fn add(mut self, predicate: Box<dyn Predicate>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Append the terminal predicate; no more predicates can follow.
    pub fn terminal<T: TerminalPredicate + 'static>(mut self, predicate: Box<T>) -> TerminatedProgram {
        self.predicates.push(predicate);
        TerminatedProgram {
            predicates: self.predicates,
        }
    }
}

/// A complete program, ready to become an engine.
#[derive(Debug)]
pub struct TerminatedProgram {
    predicates: Vec<Box<dyn Predicate>>,
}

impl TerminatedProgram {
    pub fn build(self) -> SearchEngine {
        SearchEngine::new(self.predicates)
    }
}

/// Search engine that coordinates predicate execution and backtracking.
#[derive(Debug)]
pub struct SearchEngine {
    /// List of predicates to execute in sequence.
    predicates: Vec<Box<dyn Predicate>>,

    /// Stack of predicate execution states.
    stack: Vec<StackEntry>,

    /// Statistics: number of try_pred calls.
    try_count: u64,

    /// Statistics: number of retry_pred calls (backtracks).
    retry_count: u64,

    /// Trail position when the search started; exhaustion rewinds to it.
    root_checkpoint: usize,
}

impl SearchEngine {
    /// Create a search engine running `predicates` in order.
    ///
    /// Prefer [`EngineBuilder`], which checks that the program ends with a
    /// terminal predicate.
    pub fn new(predicates: Vec<Box<dyn Predicate>>) -> Self {
        Self {
            predicates,
            stack: Vec::new(),
            try_count: 0,
            retry_count: 0,
            root_checkpoint: 0,
        }
    }

    /// Run the search until it suspends or is exhausted.
    ///
    /// Consumes the engine and returns:
    /// - `Some(engine)` if suspended; call `search` again to resume
    /// - `None` if exhausted (backtracked past the first predicate)
    ///
    /// Results are side effects on `ctx`, not return values.
    ///
    /// # Panics
    ///
    /// Panics if the program runs off its end (a predicate sequence without a
    /// terminal predicate), or if `retry_pred` returns Choices or Suspend.
    pub fn search(mut self, ctx: &mut SearchContext) -> Option<Self> {
        if self.stack.is_empty() {
            if self.predicates.is_empty() {
                return None; // Empty is exhausted
            }
            self.root_checkpoint = ctx.trail.checkpoint();
            self.stack.push(StackEntry::new(0, 0, self.root_checkpoint));
        } else {
            // Resuming after Suspend: the suspending entry is done.
            self.stack.pop();
        }

        loop {
            let Some(entry) = self.stack.last_mut() else {
                // Search exhausted (all choices failed)
                ctx.rewind_to(self.root_checkpoint);
                return None;
            };

            ctx.rewind_to(entry.trail_checkpoint);
            let predicate_index = entry.predicate_index;
            let round = entry.round;

            if !entry.in_choice_mode {
                self.try_count += 1;
                let result = self.predicates[predicate_index].try_pred(ctx, round);
                if matches!(
                    result,
                    PredicateResult::Success | PredicateResult::SuccessSamePredicate
                ) {
                    // Deterministic: backtracking into this entry just pops it.
                    entry.in_choice_mode = true;
                    entry.num_choices = 0;
                }
                match result {
                    PredicateResult::Success => {
                        self.push_next_predicate(predicate_index, ctx);
                    }
                    PredicateResult::SuccessSamePredicate => {
                        self.stack
                            .push(StackEntry::new(predicate_index, round + 1, ctx.trail.checkpoint()));
                    }
                    PredicateResult::Failure => {
                        self.stack.pop();
                    }
                    PredicateResult::Choices(n) => {
                        if let Some(entry) = self.stack.last_mut() {
                            entry.in_choice_mode = true;
                            entry.current_choice = 0;
                            entry.num_choices = n;
                            entry.trail_checkpoint = ctx.trail.checkpoint();
                        }
                    }
                    PredicateResult::Suspend => {
                        return Some(self);
                    }
                }
            } else {
                if entry.current_choice >= entry.num_choices {
                    self.stack.pop();
                    continue;
                }
                let choice = entry.current_choice;
                entry.current_choice += 1;

                self.retry_count += 1;
                let result = self.predicates[predicate_index].retry_pred(ctx, round, choice);
                match result {
                    PredicateResult::Success => {
                        self.push_next_predicate(predicate_index, ctx);
                    }
                    PredicateResult::SuccessSamePredicate => {
                        self.stack
                            .push(StackEntry::new(predicate_index, round + 1, ctx.trail.checkpoint()));
                    }
                    PredicateResult::Failure => {
                        // Try next choice (loop continues)
                    }
                    PredicateResult::Choices(_) | PredicateResult::Suspend => {
                        panic!(
                            "{}::retry_pred returned invalid result: {:?}",
                            self.predicates[predicate_index].name(),
                            result
                        );
                    }
                }
            }
        }
    }

    /// Push a new stack entry for the predicate after `current`.
    fn push_next_predicate(&mut self, current: usize, ctx: &SearchContext) {
        let next_index = current + 1;
        if next_index >= self.predicates.len() {
            panic!(
                "Invalid predicate sequence: reached end without FAIL or SUSPEND. \
                 All programs must terminate with a terminal predicate."
            );
        }
        self.stack
            .push(StackEntry::new(next_index, 0, ctx.trail.checkpoint()));
    }

    /// Returns (try_count, retry_count) since the engine was created.
    pub fn statistics(&self) -> (u64, u64) {
        (self.try_count, self.retry_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SearchParams;
    use crate::geometry::Vertex;
    use crate::propagation::ClosureRules;
    use crate::pruners::PrunerSet;
    use crate::state::Status;

    fn context() -> SearchContext {
        let params = SearchParams {
            degree: 2,
            rules: ClosureRules::SEED,
            pruners: PrunerSet::none(),
        };
        SearchContext::new(2, params).unwrap()
    }

    /// Test predicate that always succeeds.
    #[derive(Debug)]
    struct AlwaysSucceed;

    impl Predicate for AlwaysSucceed {
        fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
            PredicateResult::Success
        }
    }

    /// Test predicate that always fails.
    #[derive(Debug)]
    struct AlwaysFail;

    impl Predicate for AlwaysFail {
        fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
            PredicateResult::Failure
        }
    }

    impl TerminalPredicate for AlwaysFail {}

    /// Test predicate that suspends.
    #[derive(Debug)]
    struct Suspend;

    impl Predicate for Suspend {
        fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
            PredicateResult::Suspend
        }
    }

    impl TerminalPredicate for Suspend {}

    /// Decides vertex 0 both ways.
    #[derive(Debug)]
    struct DecideZero;

    impl Predicate for DecideZero {
        fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
            PredicateResult::Choices(2)
        }

        fn retry_pred(&mut self, ctx: &mut SearchContext, _round: usize, choice: usize) -> PredicateResult {
            let status = [Status::Infeasible, Status::Feasible][choice];
            ctx.state.object.set(&mut ctx.trail, Vertex::new(0), status);
            PredicateResult::Success
        }
    }

    #[test]
    fn test_simple_success_with_suspend() {
        let mut ctx = context();
        let engine = EngineBuilder::new()
            .add(Box::new(AlwaysSucceed))
            .terminal(Box::new(Suspend))
            .build();

        let engine = engine.search(&mut ctx);
        assert!(engine.is_some()); // Suspended - engine returned
        let engine = engine.unwrap();
        assert_eq!(engine.statistics(), (2, 0)); // AlwaysSucceed + Suspend, no retries
    }

    #[test]
    fn test_immediate_failure() {
        let mut ctx = context();
        let engine = EngineBuilder::new().terminal(Box::new(AlwaysFail)).build();
        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    fn test_backtracking_skips_deterministic_entries() {
        let mut ctx = context();
        let engine = EngineBuilder::new()
            .add(Box::new(AlwaysSucceed))
            .add(Box::new(AlwaysSucceed))
            .terminal(Box::new(AlwaysFail))
            .build();
        // Each predicate is tried once; the failure unwinds the whole stack.
        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    fn test_resume_after_deterministic_success() {
        let mut ctx = context();
        let engine = EngineBuilder::new()
            .add(Box::new(AlwaysSucceed))
            .terminal(Box::new(Suspend))
            .build();
        let engine = engine.search(&mut ctx).unwrap();
        assert!(engine.search(&mut ctx).is_none());
    }

    /// Decides vertex 0, then fails without choices.
    #[derive(Debug)]
    struct DecideThenFail;

    impl Predicate for DecideThenFail {
        fn try_pred(&mut self, ctx: &mut SearchContext, _round: usize) -> PredicateResult {
            ctx.state.object.set(&mut ctx.trail, Vertex::new(0), Status::Feasible);
            PredicateResult::Failure
        }
    }

    impl TerminalPredicate for DecideThenFail {}

    #[test]
    fn test_failing_first_predicate_is_rewound() {
        let mut ctx = context();
        let engine = EngineBuilder::new().terminal(Box::new(DecideThenFail)).build();
        assert!(engine.search(&mut ctx).is_none());
        assert_eq!(ctx.state.object.undecided_count(), 4);
        assert!(ctx.trail.is_empty());
    }

    /// Decides vertex 0 before offering choices on vertex 1.
    #[derive(Debug)]
    struct DecideThenChoose;

    impl Predicate for DecideThenChoose {
        fn try_pred(&mut self, ctx: &mut SearchContext, _round: usize) -> PredicateResult {
            ctx.state.object.set(&mut ctx.trail, Vertex::new(0), Status::Infeasible);
            PredicateResult::Choices(2)
        }

        fn retry_pred(&mut self, ctx: &mut SearchContext, _round: usize, choice: usize) -> PredicateResult {
            let status = [Status::Infeasible, Status::Feasible][choice];
            ctx.state.object.set(&mut ctx.trail, Vertex::new(1), status);
            PredicateResult::Success
        }
    }

    #[test]
    fn test_exhaustion_rewinds_work_done_before_choices() {
        let mut ctx = context();
        let engine = EngineBuilder::new()
            .add(Box::new(DecideThenChoose))
            .terminal(Box::new(AlwaysFail))
            .build();
        assert!(engine.search(&mut ctx).is_none());
        assert_eq!(ctx.state.object.undecided_count(), 4);
        assert!(ctx.trail.is_empty());
    }

    #[test]
    fn test_empty_predicates() {
        let mut ctx = context();
        let engine = SearchEngine::new(vec![]);
        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    #[should_panic(expected = "Invalid predicate sequence")]
    fn test_invalid_program_without_terminal() {
        let mut ctx = context();
        let engine = SearchEngine::new(vec![Box::new(AlwaysSucceed)]);
        let _ = engine.search(&mut ctx);
    }

    #[test]
    fn test_resume_visits_each_choice() {
        let mut ctx = context();
        let engine = EngineBuilder::new()
            .add(Box::new(DecideZero))
            .terminal(Box::new(Suspend))
            .build();

        let engine = engine.search(&mut ctx).unwrap();
        assert_eq!(ctx.state.object.status(Vertex::new(0)), Status::Infeasible);
        let engine = engine.search(&mut ctx).unwrap();
        assert_eq!(ctx.state.object.status(Vertex::new(0)), Status::Feasible);
        assert!(engine.search(&mut ctx).is_none());
        // Exhaustion rewinds everything.
        assert_eq!(ctx.state.object.undecided_count(), 4);
    }
}
