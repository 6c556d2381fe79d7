//! Error types for the walker group protocol.

use crate::group::protocol::WalkerId;
use std::time::Duration;
use thiserror::Error;

/// Failures of signal delivery and group-completion detection.
///
/// None of these fire in a healthy run: every walker sends exactly one
/// signal and the coordinator counts them all.
#[derive(Debug, Error)]
pub enum GroupError {
    /// A walker could not deliver its signal (coordinator already gone)
    #[error("walker {walker} could not deliver its completion signal: coordinator has gone away")]
    SignalUndeliverable { walker: WalkerId },

    /// Every walker's sender was dropped before all signals arrived
    #[error("walker group disconnected after {received} of {expected} completion signals")]
    Disconnected { received: usize, expected: usize },

    /// The coordinator's bounded wait expired
    #[error("timed out after {waited:?} with {received} of {expected} completion signals")]
    TimedOut {
        received: usize,
        expected: usize,
        waited: Duration,
    },

    /// A signal arrived after the group had already completed
    #[error("unexpected completion signal from walker {walker}: all {expected} walkers already reported")]
    UnexpectedSignal { walker: WalkerId, expected: usize },

    /// A walker thread panicked
    #[error("walker {walker} panicked")]
    WalkerPanicked { walker: WalkerId },

    /// The OS refused to start a walker thread
    #[error("failed to spawn walker {walker}: {error}")]
    Spawn {
        walker: WalkerId,
        #[source]
        error: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GroupError::Disconnected {
            received: 2,
            expected: 4,
        };
        assert_eq!(
            err.to_string(),
            "walker group disconnected after 2 of 4 completion signals"
        );

        let err = GroupError::UnexpectedSignal {
            walker: WalkerId::new(3),
            expected: 2,
        };
        assert!(err.to_string().contains("walker 3"));
    }
}
