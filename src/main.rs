//! walkgroup CLI entry point

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use walkgroup::config::cli::{Cli, USAGE};
use walkgroup::config::{cli_convert, toml, validator, Config};
use walkgroup::group::Group;
use walkgroup::output::json;
use walkgroup::util::time::format_duration;

/// Exit status for missing or malformed configuration
const EXIT_CONFIG: u8 = 1;
/// Exit status when the group fails to complete
const EXIT_RUN: u8 = 2;

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = e.print();
                    ExitCode::SUCCESS
                }
                _ => {
                    // Some clap errors already carry a usage line
                    let rendered = e.render().to_string();
                    eprint!("{}", rendered);
                    if !rendered.contains("Usage:") {
                        eprintln!("{}", USAGE);
                    }
                    ExitCode::from(EXIT_CONFIG)
                }
            };
        }
    };

    init_tracing(cli.debug);

    // Configuration errors abort before any walker exists
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", USAGE);
            eprintln!("Error: {:#}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_RUN)
        }
    }
}

/// Diagnostics go to stderr; RUST_LOG overrides the default level
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build and validate configuration from CLI (and config file, if given)
fn load_config(cli: &Cli) -> Result<Config> {
    cli.validate()?;

    let config = match &cli.config {
        Some(path) => {
            let partial = toml::parse_toml_file(path)?;
            toml::merge_cli_with_config(cli, partial)?
        }
        None => cli_convert::build_config_from_cli(cli)?,
    };

    validator::validate_config(&config).context("Configuration validation failed")?;

    tracing::debug!(
        walk = %config.walk,
        walkers = config.group.walkers,
        seed = ?config.group.seed,
        timeout_secs = ?config.group.timeout_secs,
        "configuration loaded"
    );

    Ok(config)
}

/// Form the group, run it to completion, and write the optional report
fn run(config: &Config) -> Result<()> {
    let report = Group::form(config)
        .run()
        .context("Walker group did not complete")?;

    tracing::debug!(
        walkers = report.completion.walkers,
        elapsed = %format_duration(report.elapsed),
        "group complete"
    );

    if let Some(path) = &config.output.json {
        let json_report = json::build_report(&report);
        json::write_json_output(path, &json_report, config.output.pretty)?;
        tracing::debug!(path = %path.display(), "completion report written");
    }

    Ok(())
}
