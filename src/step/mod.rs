//! Step sources for random walkers
//!
//! A step source draws the next unit move of a 1-D walk. The production
//! source is a fair coin backed by xoshiro256++; tests substitute scripted
//! sources to drive exact trajectories.
//!
//! # Example
//!
//! ```
//! use walkgroup::step::{Step, StepSource, coin::FairCoin};
//!
//! let mut coin = FairCoin::with_seed(7);
//! let step = coin.next_step();
//! assert!(step == Step::Left || step == Step::Right);
//! assert_eq!(step.delta().abs(), 1);
//! ```

pub mod coin;

/// One unit move of a 1-D walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Left,
    Right,
}

impl Step {
    /// Signed displacement of this step (-1 or +1)
    #[inline(always)]
    pub fn delta(self) -> i64 {
        match self {
            Step::Left => -1,
            Step::Right => 1,
        }
    }
}

/// Source of walk steps
///
/// Step sources must be `Send` so a walker can be moved onto its own thread.
/// Each walker owns its source exclusively; nothing is shared between walkers.
pub trait StepSource: Send {
    /// Draw the next step
    fn next_step(&mut self) -> Step;
}
