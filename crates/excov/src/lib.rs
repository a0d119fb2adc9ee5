//! excov library - Find example configurations that no test references
//!
//! This library exposes the CLI's config and reporting layers for testing
//! and embedding purposes. The matching itself lives in `excov-core`.

pub mod config;
pub mod output;

use config::ValidationConfig;
use excov_core::{ExamplesValidator, ScanPolicy, Validate};
use eyre::{Result, WrapErr};
use output::ValidationReport;
use std::path::{Path, PathBuf};

/// Run one validation and wrap its result for rendering
pub fn run_validation(
    validator: &dyn Validate,
    name: impl Into<String>,
    examples_dir: PathBuf,
    tests_dir: PathBuf,
    filter: impl Into<String>,
) -> Result<ValidationReport> {
    let name = name.into();
    let filter = filter.into();

    let report = validator
        .validate(&examples_dir, &tests_dir, &filter)
        .wrap_err_with(|| format!("Validation '{}' failed", name))?;

    Ok(ValidationReport {
        name,
        examples_dir,
        tests_dir,
        filter,
        report,
    })
}

/// Run a validation from its config entry, resolving paths against `base`
pub fn run_configured(validation: &ValidationConfig, base: &Path) -> Result<ValidationReport> {
    let policy = if validation.lenient {
        ScanPolicy::Lenient
    } else {
        ScanPolicy::Strict
    };

    run_validation(
        &ExamplesValidator::with_policy(policy),
        validation.name.clone(),
        validation.examples_path(base),
        validation.tests_path(base),
        validation.filter.clone(),
    )
}
