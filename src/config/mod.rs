//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! Everything here runs before the group forms: a configuration error aborts
//! the whole run before any walker exists.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub walk: WalkConfig,
    #[serde(default)]
    pub group: GroupConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Per-walker parameters, broadcast identically to every walker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// The walk ends once |position| exceeds this value (must be >= 1)
    pub domain_half_width: u64,
    /// Step budget; a walker never takes more than this many steps
    pub max_steps: u64,
}

impl WalkConfig {
    pub fn new(domain_half_width: u64, max_steps: u64) -> Self {
        Self {
            domain_half_width,
            max_steps,
        }
    }
}

impl fmt::Display for WalkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "domain half-width {}, max steps {}",
            self.domain_half_width, self.max_steps
        )
    }
}

/// Group topology configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Number of walkers (the group has one extra unit, the coordinator)
    #[serde(default = "default_walkers")]
    pub walkers: usize,
    /// Base seed for reproducible runs; derived from clock and entropy if unset
    #[serde(default)]
    pub seed: Option<u64>,
    /// Upper bound on the coordinator's wait; blocks indefinitely if unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl GroupConfig {
    /// Total number of units in the group (walkers plus the coordinator)
    ///
    /// `None` when the walker count leaves no rank for the coordinator.
    pub fn group_size(&self) -> Option<usize> {
        self.walkers.checked_add(1)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            walkers: default_walkers(),
            seed: None,
            timeout_secs: None,
        }
    }
}

fn default_walkers() -> usize {
    num_cpus::get()
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Suppress per-walker console lines
    #[serde(default)]
    pub quiet: bool,
    /// Write a JSON completion report to this path
    #[serde(default)]
    pub json: Option<PathBuf>,
    /// Pretty-print the JSON report
    #[serde(default)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_size_includes_coordinator() {
        let group = GroupConfig {
            walkers: 4,
            seed: None,
            timeout_secs: None,
        };
        assert_eq!(group.group_size(), Some(5));
    }

    #[test]
    fn test_group_size_overflow() {
        let group = GroupConfig {
            walkers: usize::MAX,
            seed: None,
            timeout_secs: None,
        };
        assert_eq!(group.group_size(), None);
    }

    #[test]
    fn test_default_walkers_nonzero() {
        assert!(GroupConfig::default().walkers >= 1);
    }

    #[test]
    fn test_timeout_conversion() {
        let mut group = GroupConfig::default();
        assert_eq!(group.timeout(), None);

        group.timeout_secs = Some(30);
        assert_eq!(group.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_walk_config_display() {
        let walk = WalkConfig::new(5, 1000);
        assert_eq!(walk.to_string(), "domain half-width 5, max steps 1000");
    }
}
