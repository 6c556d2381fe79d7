//! Walker implementation
//!
//! A walker is one unit of the group. It runs a single bounded 1-D random
//! walk to termination and then reports its final step count to the
//! coordinator exactly once.
//!
//! # Termination
//!
//! The walk starts at position 0 and takes one +/-1 step at a time. It ends
//! when either:
//! - the step budget is exhausted (`steps_taken == max_steps`), or
//! - the walker has left the domain (`|position| > domain_half_width`).
//!
//! Reaching exactly `±domain_half_width` does not end the walk.
//!
//! # Example
//!
//! ```
//! use walkgroup::config::WalkConfig;
//! use walkgroup::group::WalkerId;
//! use walkgroup::step::coin::FairCoin;
//! use walkgroup::worker::Walker;
//!
//! let walk = WalkConfig::new(5, 1000);
//! let mut walker = Walker::new(WalkerId::new(1), walk, FairCoin::with_seed(7));
//! let outcome = walker.walk();
//!
//! assert!(outcome.steps_taken <= 1000);
//! if outcome.steps_taken < 1000 {
//!     assert!(outcome.final_position.unsigned_abs() > 5);
//! }
//! ```

use crate::config::WalkConfig;
use crate::group::protocol::{CompletionSignal, SignalSender, WalkerId};
use crate::group::GroupError;
use crate::step::StepSource;

/// Why a walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// |position| exceeded the domain half-width
    LeftDomain,
    /// Took `max_steps` steps without leaving the domain
    BudgetExhausted,
}

/// Private, mutable state of one walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkerState {
    pub position: i64,
    pub steps_taken: u64,
}

impl WalkerState {
    #[inline(always)]
    fn advance(&mut self, delta: i64) {
        self.position += delta;
        self.steps_taken += 1;
    }

    #[inline(always)]
    fn outside(&self, domain_half_width: u64) -> bool {
        self.position.unsigned_abs() > domain_half_width
    }
}

/// Result of one completed walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOutcome {
    pub steps_taken: u64,
    pub final_position: i64,
    pub termination: Termination,
}

/// One random walker
///
/// Owns its configuration copy, its step source, and its state. Nothing is
/// shared with other walkers; the only outbound interaction is the single
/// completion signal sent by [`Walker::run`].
pub struct Walker<S: StepSource> {
    id: WalkerId,
    walk: WalkConfig,
    source: S,
    state: WalkerState,
}

impl<S: StepSource> Walker<S> {
    pub fn new(id: WalkerId, walk: WalkConfig, source: S) -> Self {
        Self {
            id,
            walk,
            source,
            state: WalkerState::default(),
        }
    }

    /// Run the walk to termination
    ///
    /// Calling this again continues from the current state; a finished walk
    /// returns the same outcome without taking further steps.
    pub fn walk(&mut self) -> WalkOutcome {
        let domain = self.walk.domain_half_width;

        if self.state.outside(domain) {
            return self.outcome(Termination::LeftDomain);
        }

        while self.state.steps_taken < self.walk.max_steps {
            self.state.advance(self.source.next_step().delta());
            if self.state.outside(domain) {
                return self.outcome(Termination::LeftDomain);
            }
        }

        self.outcome(Termination::BudgetExhausted)
    }

    /// Walk, print the walker's line, and signal the coordinator
    ///
    /// Consumes both the walker and its sender: the signal is sent exactly
    /// once, unconditionally, whichever termination condition fired.
    pub fn run(mut self, sender: SignalSender, echo: bool) -> Result<WalkOutcome, GroupError> {
        let outcome = self.walk();

        if echo {
            crate::output::text::print_walker_finished(self.id, outcome.steps_taken);
        }

        tracing::debug!(
            walker = %self.id,
            steps = outcome.steps_taken,
            position = outcome.final_position,
            termination = ?outcome.termination,
            "walk complete"
        );

        sender.send(CompletionSignal::new(self.id, outcome.steps_taken))?;
        Ok(outcome)
    }

    fn outcome(&self, termination: Termination) -> WalkOutcome {
        WalkOutcome {
            steps_taken: self.state.steps_taken,
            final_position: self.state.position,
            termination,
        }
    }
}
