//! Group formation and role assignment
//!
//! A group of `N + 1` units is formed once, at startup, from a validated
//! configuration. Each unit gets a stable rank and exactly one role:
//!
//! - rank 0: the [`Coordinator`]
//! - ranks 1..=N: a [`Walker`], each with its own seeded coin and its own
//!   signal sender
//!
//! [`Group::run`] puts every walker on its own thread and runs the
//! coordinator on the calling thread. Walkers never wait on each other or
//! on the coordinator.

use crate::config::{Config, WalkConfig};
use crate::group::coordinator::{Coordinator, GroupCompletion};
use crate::group::error::GroupError;
use crate::group::protocol::{signal_fan_in, SignalSender, WalkerId};
use crate::step::coin::FairCoin;
use crate::util::seed::SeedSource;
use crate::worker::{WalkOutcome, Walker};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Rank of the distinguished coordinating unit
pub const COORDINATOR_RANK: usize = 0;

/// Behavior assigned to one unit of the group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Coordinator,
    Walker,
}

impl Role {
    /// Role held by the unit at `id`'s rank
    pub fn of(id: WalkerId) -> Self {
        if id.rank() == COORDINATOR_RANK {
            Role::Coordinator
        } else {
            Role::Walker
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Coordinator => "coordinator",
            Role::Walker => "walker",
        }
    }
}

/// A walker unit: the walk itself plus its one-shot sender
struct Unit {
    id: WalkerId,
    walker: Walker<FairCoin>,
    sender: SignalSender,
}

/// Outcome of a complete run
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub walk: WalkConfig,
    /// Base seed the walkers derived their seeds from
    pub seed: u64,
    pub completion: GroupCompletion,
    pub elapsed: Duration,
    pub finished_at: chrono::DateTime<chrono::Utc>,
}

type WalkerHandle = JoinHandle<Result<WalkOutcome, GroupError>>;

/// Fixed-size group of one coordinator and N walkers
pub struct Group {
    walk: WalkConfig,
    seeds: SeedSource,
    echo: bool,
    coordinator: Coordinator,
    walkers: Vec<Unit>,
}

impl Group {
    /// Form the group: create the channel and assign every rank its role
    pub fn form(config: &Config) -> Self {
        let walkers = config.group.walkers;
        let seeds = SeedSource::from_config(config.group.seed);
        let (senders, receiver) = signal_fan_in(walkers);

        let coordinator =
            Coordinator::new(walkers, receiver).with_timeout(config.group.timeout());

        let units = senders
            .into_iter()
            .enumerate()
            .map(|(offset, sender)| {
                let id = WalkerId::new(COORDINATOR_RANK + 1 + offset);
                let coin = FairCoin::with_seed(seeds.walker_seed(id));
                Unit {
                    id,
                    walker: Walker::new(id, config.walk, coin),
                    sender,
                }
            })
            .collect();

        tracing::debug!(
            walkers,
            seed = seeds.base(),
            timeout = ?config.group.timeout(),
            "group formed"
        );

        Self {
            walk: config.walk,
            seeds,
            echo: !config.output.quiet,
            coordinator,
            walkers: units,
        }
    }

    /// Number of units, coordinator included
    pub fn size(&self) -> usize {
        self.walkers.len() + 1
    }

    /// Every rank in the group with its assigned role, in rank order
    pub fn roles(&self) -> Vec<(WalkerId, Role)> {
        std::iter::once(WalkerId::new(COORDINATOR_RANK))
            .chain(self.walkers.iter().map(|unit| unit.id))
            .map(|id| (id, Role::of(id)))
            .collect()
    }

    /// Run every unit until the coordinator observes group completion
    pub fn run(self) -> Result<GroupReport, GroupError> {
        let started = Instant::now();

        for (id, role) in self.roles() {
            tracing::debug!(rank = id.rank(), role = role.name(), "role assigned");
        }

        let mut handles: Vec<(WalkerId, WalkerHandle)> = Vec::with_capacity(self.walkers.len());

        for Unit { id, walker, sender } in self.walkers {
            let echo = self.echo;
            let spawned = thread::Builder::new()
                .name(format!("walker-{}", id))
                .spawn(move || walker.run(sender, echo));

            match spawned {
                Ok(handle) => handles.push((id, handle)),
                Err(error) => {
                    tracing::warn!(walker = %id, error = %error, "failed to spawn walker thread");
                    // Started walkers see the receiver gone and fail their send
                    drop(self.coordinator);
                    if let Err(e) = join_walkers(handles) {
                        tracing::warn!(error = %e, "walker failed while unwinding the group");
                    }
                    return Err(GroupError::Spawn { walker: id, error });
                }
            }
        }

        let completion = self.coordinator.wait_all()?;

        crate::output::text::print_group_finished(completion.walkers);

        // Every walker has signalled; joining only reaps the threads
        join_walkers(handles)?;

        Ok(GroupReport {
            walk: self.walk,
            seed: self.seeds.base(),
            completion,
            elapsed: started.elapsed(),
            finished_at: chrono::Utc::now(),
        })
    }
}

/// Join every walker thread
///
/// All handles are joined even after a failure; the first panic is reported.
fn join_walkers(handles: Vec<(WalkerId, WalkerHandle)>) -> Result<(), GroupError> {
    let mut panicked = None;

    for (id, handle) in handles {
        match handle.join() {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::warn!(walker = %id, error = %e, "walker reported an error"),
            Err(_) => {
                panicked.get_or_insert(id);
            }
        }
    }

    match panicked {
        Some(walker) => Err(GroupError::WalkerPanicked { walker }),
        None => Ok(()),
    }
}
