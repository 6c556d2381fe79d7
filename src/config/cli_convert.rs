//! CLI to Config conversion utilities

use crate::config::cli::Cli;
use crate::config::{Config, GroupConfig, OutputConfig, WalkConfig};
use anyhow::{Context, Result};

/// Parse a duration string (e.g., "60s", "5m", "1h") to seconds
pub fn parse_duration(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase();

    let (num_str, multiplier) = if s.ends_with("sec") || s.ends_with('s') {
        (s.trim_end_matches("sec").trim_end_matches('s'), 1u64)
    } else if s.ends_with("min") || s.ends_with('m') {
        (s.trim_end_matches("min").trim_end_matches('m'), 60)
    } else if s.ends_with("hr") || s.ends_with('h') {
        (s.trim_end_matches("hr").trim_end_matches('h'), 3600)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .parse()
        .with_context(|| format!("Invalid duration format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Duration out of range: {}", s))
}

/// Build a configuration from CLI arguments alone
///
/// Assumes `Cli::validate` has passed without a config file, so both
/// positional arguments are present.
pub fn build_config_from_cli(cli: &Cli) -> Result<Config> {
    let domain_half_width = cli
        .domain_half_width
        .context("missing <domain_half_width>")?;
    let max_steps = cli.max_steps.context("missing <max_steps>")?;

    let timeout_secs = cli
        .timeout
        .as_deref()
        .map(parse_duration)
        .transpose()
        .context("Invalid timeout")?;

    let mut group = GroupConfig::default();
    if let Some(walkers) = cli.walkers {
        group.walkers = walkers;
    }
    group.seed = cli.seed;
    group.timeout_secs = timeout_secs;

    Ok(Config {
        walk: WalkConfig::new(domain_half_width, max_steps),
        group,
        output: OutputConfig {
            quiet: cli.quiet,
            json: cli.json.clone(),
            pretty: cli.pretty,
        },
    })
}
