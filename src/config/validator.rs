//! Configuration validation

use super::*;
use anyhow::Result;
use std::time::{Duration, Instant};

/// Most walker threads a single group may spawn
pub const MAX_WALKERS: usize = 4096;

/// Longest coordinator wait accepted (one year)
pub const MAX_TIMEOUT_SECS: u64 = 365 * 24 * 60 * 60;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_walk(&config.walk)?;
    validate_group(&config.group)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate walk parameters
pub fn validate_walk(walk: &WalkConfig) -> Result<()> {
    if walk.domain_half_width == 0 {
        anyhow::bail!("domain_half_width must be at least 1, got 0");
    }

    // i64 positions: the walker must be able to step one past the boundary
    if walk.domain_half_width >= i64::MAX as u64 {
        anyhow::bail!(
            "domain_half_width must be below {}, got {}",
            i64::MAX,
            walk.domain_half_width
        );
    }

    Ok(())
}

/// Validate group topology
pub fn validate_group(group: &GroupConfig) -> Result<()> {
    if group.walkers > MAX_WALKERS {
        anyhow::bail!(
            "walkers must be at most {}, got {}",
            MAX_WALKERS,
            group.walkers
        );
    }

    if let Some(timeout) = group.timeout_secs {
        if timeout == 0 {
            anyhow::bail!("timeout must be at least 1 second");
        }
        if timeout > MAX_TIMEOUT_SECS
            || Instant::now()
                .checked_add(Duration::from_secs(timeout))
                .is_none()
        {
            anyhow::bail!(
                "timeout must be at most {} seconds, got {}",
                MAX_TIMEOUT_SECS,
                timeout
            );
        }
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if let Some(path) = &output.json {
        if path.as_os_str().is_empty() {
            anyhow::bail!("json output path must not be empty");
        }
    }

    Ok(())
}
