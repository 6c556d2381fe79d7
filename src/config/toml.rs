//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::parse_duration;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// File layout: walk parameters are optional so the CLI can supply them
#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    walk: FileWalkConfig,
    #[serde(default)]
    group: GroupConfig,
    #[serde(default)]
    output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
struct FileWalkConfig {
    domain_half_width: Option<u64>,
    max_steps: Option<u64>,
}

/// Partially-specified configuration read from a file
#[derive(Debug, Clone)]
pub struct PartialConfig {
    pub domain_half_width: Option<u64>,
    pub max_steps: Option<u64>,
    pub group: GroupConfig,
    pub output: OutputConfig,
}

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<PartialConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<PartialConfig> {
    let file: FileConfig = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(PartialConfig {
        domain_half_width: file.walk.domain_half_width,
        max_steps: file.walk.max_steps,
        group: file.group,
        output: file.output,
    })
}

/// Merge CLI arguments with file configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, partial: PartialConfig) -> Result<Config> {
    let domain_half_width = cli
        .domain_half_width
        .or(partial.domain_half_width)
        .context("missing <domain_half_width> (not on the command line or in the config file)")?;
    let max_steps = cli
        .max_steps
        .or(partial.max_steps)
        .context("missing <max_steps> (not on the command line or in the config file)")?;

    let mut group = partial.group;
    if let Some(walkers) = cli.walkers {
        group.walkers = walkers;
    }
    if cli.seed.is_some() {
        group.seed = cli.seed;
    }
    if let Some(timeout) = &cli.timeout {
        group.timeout_secs = Some(parse_duration(timeout).context("Invalid timeout")?);
    }

    let mut output = partial.output;
    if cli.quiet {
        output.quiet = true;
    }
    if cli.pretty {
        output.pretty = true;
    }
    if cli.json.is_some() {
        output.json = cli.json.clone();
    }

    Ok(Config {
        walk: WalkConfig::new(domain_half_width, max_steps),
        group,
        output,
    })
}
