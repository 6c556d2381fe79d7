//! Walker group: topology, signal protocol, and completion detection
//!
//! # Architecture
//!
//! - **Coordinator** (rank 0): counts completion signals until every walker
//!   has reported, in any arrival order
//! - **Walkers** (ranks 1..=N): run independently on their own threads and
//!   each post exactly one signal
//!
//! There is no shared mutable state between units. The only synchronization
//! is the many-to-one signal channel.
//!
//! # Modules
//!
//! - `protocol`: identities, signals, and the walker-to-coordinator channel
//! - `coordinator`: group-completion detection
//! - `bootstrap`: group formation and role assignment
//! - `error`: protocol failures

pub mod bootstrap;
pub mod coordinator;
pub mod error;
pub mod protocol;

// Re-export key types
pub use bootstrap::{Group, GroupReport, Role, COORDINATOR_RANK};
pub use coordinator::{Coordinator, CoordinatorState, GroupCompletion, Progress};
pub use error::GroupError;
pub use protocol::{CompletionSignal, SignalReceiver, SignalSender, WalkerId};
