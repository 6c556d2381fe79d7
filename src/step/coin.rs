//! Fair coin step source
//!
//! Each draw is an independent, equally likely choice between -1 and +1.
//!
//! # Performance
//!
//! Uses the xoshiro256++ PRNG which is very fast and has good statistical
//! properties. One draw is made per simulated step.

use super::{Step, StepSource};
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Fair coin over {Left, Right}
pub struct FairCoin {
    rng: Xoshiro256PlusPlus,
}

impl FairCoin {
    /// Create a coin with a specific seed
    ///
    /// Distinct seeds give distinct sequences; see `util::seed` for how
    /// walkers derive theirs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl StepSource for FairCoin {
    #[inline(always)]
    fn next_step(&mut self) -> Step {
        if self.rng.gen::<bool>() {
            Step::Right
        } else {
            Step::Left
        }
    }
}
