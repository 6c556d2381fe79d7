//! Group-completion coordinator
//!
//! The coordinator is rank 0 of the group. It knows only how many walkers
//! exist, not which one will finish next: it repeatedly receives from any
//! walker and counts. Counting is commutative, so the outcome is the same for
//! every arrival order.
//!
//! Without a timeout the wait blocks until every walker reports. A walker
//! that never sends leaves the coordinator waiting, unless every sender has
//! been dropped, in which case the channel reports disconnection.

use crate::group::error::GroupError;
use crate::group::protocol::{CompletionSignal, SignalReceiver};
use crate::util::time::Deadline;
use crossbeam::channel::RecvTimeoutError;
use std::time::Duration;

/// Counting progress after one observed signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Pending { received: usize, expected: usize },
    Complete { walkers: usize },
}

/// Coordinator's private counter
///
/// `received` increases by exactly one per observed signal and reaches
/// `expected` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorState {
    expected: usize,
    received: usize,
}

impl CoordinatorState {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            received: 0,
        }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn received(&self) -> usize {
        self.received
    }

    pub fn is_complete(&self) -> bool {
        self.received == self.expected
    }

    /// Count one signal
    ///
    /// A signal arriving after completion is rejected rather than counted.
    pub fn observe(&mut self, signal: &CompletionSignal) -> Result<Progress, GroupError> {
        if self.is_complete() {
            return Err(GroupError::UnexpectedSignal {
                walker: signal.source,
                expected: self.expected,
            });
        }

        self.received += 1;

        if self.is_complete() {
            Ok(Progress::Complete {
                walkers: self.expected,
            })
        } else {
            Ok(Progress::Pending {
                received: self.received,
                expected: self.expected,
            })
        }
    }
}

/// Aggregate observation: every walker has finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCompletion {
    pub walkers: usize,
    /// Signals in the order they arrived
    pub arrivals: Vec<CompletionSignal>,
}

/// The distinguished unit that detects when all walkers have finished
pub struct Coordinator {
    state: CoordinatorState,
    receiver: SignalReceiver,
    timeout: Option<Duration>,
}

impl Coordinator {
    pub fn new(expected: usize, receiver: SignalReceiver) -> Self {
        Self {
            state: CoordinatorState::new(expected),
            receiver,
            timeout: None,
        }
    }

    /// Bound the whole wait; `None` blocks until every walker reports
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Receive from any walker until all have reported
    ///
    /// Returns exactly once, after the last signal; never before.
    pub fn wait_all(mut self) -> Result<GroupCompletion, GroupError> {
        let deadline = self.timeout.and_then(Deadline::after);
        if self.timeout.is_some() && deadline.is_none() {
            tracing::warn!(
                timeout = ?self.timeout,
                "timeout beyond clock range, waiting without a deadline"
            );
        }
        let mut arrivals = Vec::with_capacity(self.state.expected());

        while !self.state.is_complete() {
            let signal = self.next_signal(deadline)?;

            match self.state.observe(&signal)? {
                Progress::Pending { received, expected } => {
                    tracing::debug!(
                        walker = %signal.source,
                        steps = signal.steps_taken,
                        received,
                        expected,
                        "completion signal"
                    );
                }
                Progress::Complete { walkers } => {
                    tracing::debug!(
                        walker = %signal.source,
                        steps = signal.steps_taken,
                        walkers,
                        "final completion signal"
                    );
                }
            }

            arrivals.push(signal);
        }

        Ok(GroupCompletion {
            walkers: self.state.expected(),
            arrivals,
        })
    }

    fn next_signal(&self, deadline: Option<Deadline>) -> Result<CompletionSignal, GroupError> {
        let received = self.state.received();
        let expected = self.state.expected();

        match deadline {
            None => self.receiver.recv().map_err(|_| {
                tracing::warn!(received, expected, "all walkers disconnected");
                GroupError::Disconnected { received, expected }
            }),
            Some(deadline) => self
                .receiver
                .recv_deadline(deadline.instant())
                .map_err(|err| match err {
                    RecvTimeoutError::Timeout => {
                        tracing::warn!(received, expected, "timed out waiting for walkers");
                        GroupError::TimedOut {
                            received,
                            expected,
                            waited: deadline.waited(),
                        }
                    }
                    RecvTimeoutError::Disconnected => {
                        tracing::warn!(received, expected, "all walkers disconnected");
                        GroupError::Disconnected { received, expected }
                    }
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::protocol::{signal_channel, signal_fan_in, WalkerId};
    use std::thread;

    fn count_signals(expected: usize, signals: &[CompletionSignal]) -> CoordinatorState {
        let mut state = CoordinatorState::new(expected);
        for signal in signals {
            state.observe(signal).unwrap();
        }
        state
    }

    fn signals(steps: &[u64]) -> Vec<CompletionSignal> {
        steps
            .iter()
            .enumerate()
            .map(|(i, &s)| CompletionSignal::new(WalkerId::new(i + 1), s))
            .collect()
    }

    /// All permutations of `items` (Heap's algorithm)
    fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
        fn heap<T: Clone>(k: usize, items: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
            if k <= 1 {
                out.push(items.clone());
                return;
            }
            for i in 0..k {
                heap(k - 1, items, out);
                let j = if k % 2 == 0 { i } else { 0 };
                items.swap(j, k - 1);
            }
        }
        let mut items = items.to_vec();
        let mut out = Vec::new();
        let len = items.len();
        heap(len, &mut items, &mut out);
        out
    }

    #[test]
    fn test_count_increases_by_one_and_completes_once() {
        let mut state = CoordinatorState::new(3);
        let all = signals(&[5, 9, 2]);

        assert_eq!(
            state.observe(&all[0]).unwrap(),
            Progress::Pending { received: 1, expected: 3 }
        );
        assert_eq!(
            state.observe(&all[1]).unwrap(),
            Progress::Pending { received: 2, expected: 3 }
        );
        assert!(!state.is_complete());
        assert_eq!(state.observe(&all[2]).unwrap(), Progress::Complete { walkers: 3 });
        assert!(state.is_complete());
    }

    #[test]
    fn test_signal_after_completion_rejected() {
        let mut state = CoordinatorState::new(1);
        let all = signals(&[4, 4]);
        state.observe(&all[0]).unwrap();

        let err = state.observe(&all[1]).unwrap_err();
        assert!(matches!(err, GroupError::UnexpectedSignal { expected: 1, .. }));
        assert_eq!(state.received(), 1);
    }

    #[test]
    fn test_zero_walkers_complete_immediately() {
        let state = CoordinatorState::new(0);
        assert!(state.is_complete());

        let (senders, receiver) = signal_fan_in(0);
        assert!(senders.is_empty());
        let completion = Coordinator::new(0, receiver).wait_all().unwrap();
        assert_eq!(completion.walkers, 0);
        assert!(completion.arrivals.is_empty());
    }

    #[test]
    fn test_order_independence() {
        let all = signals(&[3, 1000, 17, 6]);
        let expected_state = count_signals(4, &all);

        for perm in permutations(&all) {
            let state = count_signals(4, &perm);
            assert_eq!(state, expected_state);
            assert!(state.is_complete());
        }
    }

    #[test]
    fn test_wait_all_under_every_arrival_order() {
        let all = signals(&[3, 1000, 17, 6]);

        for perm in permutations(&all) {
            let (senders, receiver) = signal_fan_in(perm.len());
            for (sender, signal) in senders.into_iter().zip(perm.iter()) {
                sender.send(*signal).unwrap();
            }

            let completion = Coordinator::new(4, receiver).wait_all().unwrap();
            assert_eq!(completion.walkers, 4);
            assert_eq!(completion.arrivals, perm);
        }
    }

    #[test]
    fn test_wait_all_with_concurrent_walkers() {
        let (senders, receiver) = signal_fan_in(8);
        let handles: Vec<_> = senders
            .into_iter()
            .enumerate()
            .map(|(i, sender)| {
                thread::spawn(move || {
                    thread::sleep(Duration::from_millis((8 - i as u64) * 2));
                    sender
                        .send(CompletionSignal::new(WalkerId::new(i + 1), i as u64))
                        .unwrap();
                })
            })
            .collect();

        let completion = Coordinator::new(8, receiver).wait_all().unwrap();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut ranks: Vec<usize> = completion.arrivals.iter().map(|s| s.source.rank()).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_disconnect_detected() {
        let (mut senders, receiver) = signal_fan_in(3);
        senders
            .pop()
            .unwrap()
            .send(CompletionSignal::new(WalkerId::new(3), 1))
            .unwrap();
        drop(senders);

        let err = Coordinator::new(3, receiver).wait_all().unwrap_err();
        assert!(matches!(err, GroupError::Disconnected { received: 1, expected: 3 }));
    }

    #[test]
    fn test_timeout_bounds_the_wait() {
        let (sender, receiver) = signal_channel();

        let err = Coordinator::new(1, receiver)
            .with_timeout(Some(Duration::from_millis(30)))
            .wait_all()
            .unwrap_err();
        assert!(matches!(err, GroupError::TimedOut { received: 0, expected: 1, .. }));
        drop(sender);
    }

    #[test]
    fn test_timeout_not_hit_when_walkers_report() {
        let (senders, receiver) = signal_fan_in(2);
        for (i, sender) in senders.into_iter().enumerate() {
            sender.send(CompletionSignal::new(WalkerId::new(i + 1), 1)).unwrap();
        }

        let completion = Coordinator::new(2, receiver)
            .with_timeout(Some(Duration::from_secs(5)))
            .wait_all()
            .unwrap();
        assert_eq!(completion.arrivals.len(), 2);
    }

    #[test]
    fn test_timeout_beyond_clock_range_waits_without_deadline() {
        let (senders, receiver) = signal_fan_in(1);
        for sender in senders {
            sender.send(CompletionSignal::new(WalkerId::new(1), 7)).unwrap();
        }

        let completion = Coordinator::new(1, receiver)
            .with_timeout(Some(Duration::from_secs(u64::MAX)))
            .wait_all()
            .unwrap();
        assert_eq!(completion.arrivals, vec![CompletionSignal::new(WalkerId::new(1), 7)]);
    }
}
