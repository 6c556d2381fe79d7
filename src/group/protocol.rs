//! Walker-to-coordinator signal protocol
//!
//! Each walker holds one [`SignalSender`]; the coordinator holds the single
//! [`SignalReceiver`]. The channel is many-to-one and unordered: the
//! coordinator receives from whichever walker posts next.
//!
//! # Message Flow
//!
//! ```text
//! Walker 1 ──┐
//! Walker 2 ──┼── COMPLETION(rank, steps) ──> Coordinator (rank 0)
//! Walker N ──┘
//! ```
//!
//! Messages are tagged by their [`Message`] variant, so the coordinator can
//! tell completion traffic apart from anything else that might share the
//! channel. Completion is the only message today.
//!
//! # Exactly-once delivery
//!
//! `SignalSender` is not `Clone` and [`SignalSender::send`] consumes it, so a
//! walker can send at most one signal. Walkers send unconditionally after
//! their loop exits, which makes it exactly one.

use crate::group::error::GroupError;
use crossbeam::channel::{self, Receiver, RecvError, RecvTimeoutError, Sender};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Stable identity of a unit within the group
///
/// Rank 0 is the coordinator; walkers are ranks `1..=N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalkerId(usize);

impl WalkerId {
    pub const fn new(rank: usize) -> Self {
        Self(rank)
    }

    pub const fn rank(self) -> usize {
        self.0
    }
}

impl fmt::Display for WalkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One walker's "I'm done" report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSignal {
    pub source: WalkerId,
    pub steps_taken: u64,
}

impl CompletionSignal {
    pub fn new(source: WalkerId, steps_taken: u64) -> Self {
        Self {
            source,
            steps_taken,
        }
    }
}

/// Tagged message on the walker-to-coordinator channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Completion(CompletionSignal),
}

/// Sending half held by exactly one walker
#[derive(Debug)]
pub struct SignalSender {
    tx: Sender<Message>,
}

impl SignalSender {
    /// Post the completion signal, consuming the sender
    ///
    /// Never blocks: the channel is unbounded. Fails only if the coordinator's
    /// receiver has been dropped.
    pub fn send(self, signal: CompletionSignal) -> Result<(), GroupError> {
        self.tx
            .send(Message::Completion(signal))
            .map_err(|_| GroupError::SignalUndeliverable {
                walker: signal.source,
            })
    }
}

/// Receiving half held by the coordinator
#[derive(Debug)]
pub struct SignalReceiver {
    rx: Receiver<Message>,
}

impl SignalReceiver {
    /// Block until a completion signal arrives from any walker
    ///
    /// Errors once every sender has been dropped and the queue is empty.
    pub fn recv(&self) -> Result<CompletionSignal, RecvError> {
        self.rx.recv().map(Self::unwrap_completion)
    }

    /// Like [`recv`](Self::recv) but gives up at `deadline`
    pub fn recv_deadline(&self, deadline: Instant) -> Result<CompletionSignal, RecvTimeoutError> {
        self.rx.recv_deadline(deadline).map(Self::unwrap_completion)
    }

    fn unwrap_completion(message: Message) -> CompletionSignal {
        match message {
            Message::Completion(signal) => signal,
        }
    }
}

/// Create a channel with a single sender
pub fn signal_channel() -> (SignalSender, SignalReceiver) {
    let (tx, rx) = channel::unbounded();
    (SignalSender { tx }, SignalReceiver { rx })
}

/// Create a many-to-one channel with one sender per walker
///
/// No sender is retained: once all `count` senders are consumed or dropped,
/// the receiver observes disconnection.
pub fn signal_fan_in(count: usize) -> (Vec<SignalSender>, SignalReceiver) {
    let (tx, rx) = channel::unbounded();
    let senders = (0..count)
        .map(|_| SignalSender { tx: tx.clone() })
        .collect();
    (senders, SignalReceiver { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_walker_id_display() {
        assert_eq!(WalkerId::new(7).to_string(), "7");
        assert_eq!(WalkerId::new(7).rank(), 7);
    }

    #[test]
    fn test_fan_in_receives_from_any_sender() {
        let (senders, receiver) = signal_fan_in(3);

        let handles: Vec<_> = senders
            .into_iter()
            .enumerate()
            .map(|(i, sender)| {
                thread::spawn(move || {
                    sender
                        .send(CompletionSignal::new(WalkerId::new(i + 1), i as u64))
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut sources: Vec<usize> = (0..3).map(|_| receiver.recv().unwrap().source.rank()).collect();
        sources.sort_unstable();
        assert_eq!(sources, vec![1, 2, 3]);
        assert!(receiver.recv().is_err());
    }

    #[test]
    fn test_fan_in_with_no_senders_is_disconnected() {
        let (senders, receiver) = signal_fan_in(0);
        assert!(senders.is_empty());
        assert!(receiver.recv().is_err());
    }

    #[test]
    fn test_recv_deadline_times_out() {
        let (_sender, receiver) = signal_channel();
        let deadline = Instant::now() + Duration::from_millis(20);
        assert_eq!(
            receiver.recv_deadline(deadline),
            Err(RecvTimeoutError::Timeout)
        );
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let (sender, receiver) = signal_channel();
        drop(receiver);

        let err = sender
            .send(CompletionSignal::new(WalkerId::new(2), 10))
            .unwrap_err();
        assert!(matches!(err, GroupError::SignalUndeliverable { walker } if walker == WalkerId::new(2)));
    }

    #[test]
    fn test_signal_serializes_rank_transparently() {
        let json = serde_json::to_string(&CompletionSignal::new(WalkerId::new(2), 9)).unwrap();
        assert_eq!(json, r#"{"source":2,"steps_taken":9}"#);
    }
}
