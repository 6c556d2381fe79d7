//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// Short usage line printed when the arguments are missing or malformed
pub const USAGE: &str = "Usage: walkgroup [OPTIONS] <domain_half_width> <max_steps>";

/// walkgroup - concurrent bounded random walkers with a completion coordinator
#[derive(Parser, Debug)]
#[command(name = "walkgroup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Domain half-width: a walker stops once |position| exceeds this
    #[arg(value_name = "DOMAIN_HALF_WIDTH")]
    pub domain_half_width: Option<u64>,

    /// Maximum number of steps per walker
    #[arg(value_name = "MAX_STEPS")]
    pub max_steps: Option<u64>,

    // === Group Options ===
    /// Number of walkers (defaults to the number of CPUs)
    #[arg(short = 'w', long, env = "WALKGROUP_WALKERS")]
    pub walkers: Option<usize>,

    /// Base seed for reproducible walks
    #[arg(long)]
    pub seed: Option<u64>,

    /// Give up waiting for walkers after this long (e.g., 30s, 5m, 1h)
    #[arg(long)]
    pub timeout: Option<String>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // === Output Options ===
    /// Write a JSON completion report to this file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Suppress per-walker lines
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Enable debug diagnostics on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments without exiting on error
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.config.is_some() {
            // The file may supply the walk parameters, checked after merging
            return Ok(());
        }

        match (self.domain_half_width, self.max_steps) {
            (Some(_), Some(_)) => Ok(()),
            (None, _) => anyhow::bail!("missing <domain_half_width>"),
            (Some(_), None) => anyhow::bail!("missing <max_steps>"),
        }
    }
}
