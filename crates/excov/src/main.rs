//! excov - Find example configurations that no test references
//!
//! excov lists the example directories of a module, scans the test files
//! selected by a name filter for `source = "./examples/..."` lines, and
//! reports every example that no test points at.

use clap::Parser;
use excov::config::{Config, DEFAULT_CONFIG_PATH};
use excov::output::{OutputFormat, ValidationReport, render_reports};
use excov::{run_configured, run_validation};
use excov_core::{ExamplesValidator, ScanPolicy};
use eyre::Result;
use owo_colors::OwoColorize;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "excov", version, about)]
struct Args {
    /// Path to config file (default: .config/excov/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Examples directory (skips the config file)
    #[arg(long)]
    examples: Option<PathBuf>,

    /// Tests directory (with --examples)
    #[arg(long)]
    tests: Option<PathBuf>,

    /// Substring a test file name must contain to be scanned (with --examples)
    #[arg(long)]
    filter: Option<String>,

    /// Skip unreadable test files instead of failing
    #[arg(long)]
    lenient: bool,

    /// Exit with status 1 if any example is missing a test
    #[arg(long)]
    check: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Show every reference found and enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let reports = match (&args.examples, &args.tests, &args.filter) {
        (Some(examples), Some(tests), Some(filter)) => {
            let policy = if args.lenient {
                ScanPolicy::Lenient
            } else {
                ScanPolicy::Strict
            };
            eprintln!(
                "{} Checking {} against tests in {}...",
                "->".blue().bold(),
                examples.display().to_string().cyan(),
                tests.display().to_string().cyan()
            );
            vec![run_validation(
                &ExamplesValidator::with_policy(policy),
                examples.display().to_string(),
                examples.clone(),
                tests.clone(),
                filter.clone(),
            )?]
        }
        (None, None, None) => run_from_config(&args)?,
        _ => {
            eyre::bail!("--examples, --tests and --filter must be given together");
        }
    };

    let output = render_reports(&reports, args.format, args.verbose)?;
    print!("{}", output);
    std::io::stdout().flush()?;

    let all_tested = reports.iter().all(|r| r.report.is_complete());
    if args.check && !all_tested {
        std::process::exit(1);
    }

    Ok(())
}

fn run_from_config(args: &Args) -> Result<Vec<ValidationReport>> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = Config::load(&config_path)?;

    // Relative directories in the config are relative to the config file
    let config_dir = config_path
        .parent()
        .ok_or_else(|| eyre::eyre!("Config path has no parent directory"))?;

    let mut reports = Vec::with_capacity(config.validations.len());
    for mut validation in config.validations {
        // --lenient applies on top of each entry's own setting
        validation.lenient |= args.lenient;

        eprintln!(
            "{} Checking examples for {}...",
            "->".blue().bold(),
            validation.name.cyan()
        );

        let report = run_configured(&validation, config_dir)?;

        eprintln!(
            "   Found {} examples, {} missing tests",
            report.report.examples.len().to_string().green(),
            report.report.missing.len().to_string().yellow()
        );
        reports.push(report);
    }

    Ok(reports)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
