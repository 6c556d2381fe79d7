//! JSON completion report
//!
//! Records who finished and in what order, plus the run parameters needed to
//! reproduce it. No statistics are derived from the step counts.
//!
//! # Format
//!
//! ```json
//! {
//!   "config": { "domain_half_width": 5, "max_steps": 1000, "walkers": 4, "seed": 12345 },
//!   "finished_at": "2026-01-01T00:00:00.000000Z",
//!   "elapsed_ms": 1.42,
//!   "arrivals": [ { "source": 3, "steps_taken": 17 }, ... ]
//! }
//! ```

use crate::group::{CompletionSignal, GroupReport};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Run parameters as recorded in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRunConfig {
    pub domain_half_width: u64,
    pub max_steps: u64,
    pub walkers: usize,
    pub seed: u64,
}

/// Complete report for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub config: JsonRunConfig,
    pub finished_at: String,
    pub elapsed_ms: f64,
    /// Completion signals in arrival order
    pub arrivals: Vec<CompletionSignal>,
}

/// Build a JSON report from a group report
pub fn build_report(report: &GroupReport) -> JsonReport {
    JsonReport {
        config: JsonRunConfig {
            domain_half_width: report.walk.domain_half_width,
            max_steps: report.walk.max_steps,
            walkers: report.completion.walkers,
            seed: report.seed,
        },
        finished_at: report
            .finished_at
            .to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
        elapsed_ms: report.elapsed.as_secs_f64() * 1_000.0,
        arrivals: report.completion.arrivals.clone(),
    }
}

/// Write JSON report to file
pub fn write_json_output(output_path: &Path, report: &JsonReport, pretty: bool) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, report)?;
    } else {
        serde_json::to_writer(&mut writer, report)?;
    }

    writer.flush()?;
    Ok(())
}
