//! walkgroup - concurrent bounded random walkers
//!
//! A fixed group of walker threads each runs one bounded 1-D random walk and
//! reports its final step count exactly once. A single coordinator counts the
//! signals, in whatever order they arrive, and declares completion once every
//! walker has reported.
//!
//! # Architecture
//!
//! - **Walkers**: private state, private RNG, one outbound completion signal
//! - **Coordinator**: order-insensitive group-completion detection
//! - **Bootstrap**: role assignment by rank (rank 0 coordinates, 1..=N walk)
//! - **Output**: console lines plus an optional JSON completion report

pub mod config;
pub mod group;
pub mod output;
pub mod step;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use group::{Coordinator, CompletionSignal, Group, GroupReport, WalkerId};
pub use worker::{Walker, WalkOutcome};

/// Result type used throughout walkgroup
pub type Result<T> = anyhow::Result<T>;
