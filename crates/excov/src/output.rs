//! Output formatting for missing-test reports

use excov_core::MissingReport;
use eyre::Result;
use facet::Facet;
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Identifier carried by every JSON report record
pub const REPORT_ID: &str = "examples-validation";

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    #[value(alias = "md")]
    Markdown,
}

/// A missing-test report plus the inputs that produced it
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub name: String,
    pub examples_dir: PathBuf,
    pub tests_dir: PathBuf,
    pub filter: String,
    pub report: MissingReport,
}

/// Render reports in the specified format
pub fn render_reports(
    reports: &[ValidationReport],
    format: OutputFormat,
    verbose: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(reports.iter().map(|r| render_text(r, verbose)).collect()),
        OutputFormat::Json => render_json(reports),
        OutputFormat::Markdown => Ok(reports
            .iter()
            .map(|r| render_markdown(r, verbose))
            .collect()),
    }
}

fn render_text(validation: &ValidationReport, verbose: bool) -> String {
    let report = &validation.report;
    let mut output = String::new();

    output.push('\n');
    output.push_str(&format!(
        "{} {} Example Coverage\n",
        "##".bold(),
        validation.name.cyan().bold()
    ));
    output.push_str(&format!(
        "   {} {}  {} {}  {} {}\n",
        "examples:".dimmed(),
        validation.examples_dir.display(),
        "tests:".dimmed(),
        validation.tests_dir.display(),
        "filter:".dimmed(),
        validation.filter
    ));
    output.push('\n');

    let percent = report.coverage_percent();
    let percent_str = format!("{:.1}%", percent);
    let color_percent = if report.is_complete() {
        percent_str.green().to_string()
    } else if percent >= 50.0 {
        percent_str.yellow().to_string()
    } else {
        percent_str.red().to_string()
    };

    output.push_str(&format!(
        "Tested: {} ({}/{} examples, {} test files scanned)\n",
        color_percent,
        report.tested(),
        report.examples.len(),
        report.scanned_files.len()
    ));
    output.push('\n');

    if !report.warnings.is_empty() {
        output.push_str(&format!(
            "{} Skipped Test Files ({}):\n",
            "!".red().bold(),
            report.warnings.len()
        ));
        for warning in &report.warnings {
            output.push_str(&format!("  {} {}\n", "-".red(), warning));
        }
        output.push('\n');
    }

    if !report.missing.is_empty() {
        output.push_str(&format!(
            "{} Missing Tests ({}):\n",
            "?".yellow().bold(),
            report.missing.len()
        ));
        for example in &report.missing {
            output.push_str(&format!("  {} {}\n", "-".yellow(), example));
        }
        output.push('\n');
    }

    if verbose {
        output.push_str(&format!(
            "{} Examples ({}):\n",
            "=".bold(),
            report.examples.len()
        ));
        for example in &report.examples {
            let count = report.reference_count(example);
            let count_str = format!("{} references", count);
            let count_str = if count == 0 {
                count_str.yellow().to_string()
            } else {
                count_str.green().to_string()
            };
            output.push_str(&format!("  {} {} ({})\n", "-".dimmed(), example, count_str));
        }
        output.push('\n');

        let unknown: Vec<_> = report.unknown_references().collect();
        if !unknown.is_empty() {
            output.push_str(&format!(
                "{} References to unknown examples ({}):\n",
                "~".dimmed(),
                unknown.len()
            ));
            for r in unknown {
                output.push_str(&format!(
                    "  {} {}:{} \"{}\"\n",
                    "-".dimmed(),
                    r.file.display(),
                    r.line,
                    r.raw.dimmed()
                ));
            }
            output.push('\n');
        }

        if !report.references.is_empty() {
            output.push_str(&format!(
                "{} References ({}):\n",
                "+".green().bold(),
                report.references.len()
            ));
            for r in &report.references.references {
                output.push_str(&format!(
                    "  [{}] {}:{}\n",
                    r.example.green(),
                    r.file.display().to_string().dimmed(),
                    r.line.to_string().dimmed()
                ));
            }
            output.push('\n');
        }
    }

    output
}

#[derive(Facet)]
struct JsonOutput {
    validations: Vec<JsonReport>,
}

#[derive(Facet)]
struct JsonReport {
    id: String,
    name: String,
    examples_directory: String,
    tests_directory: String,
    filter: String,
    total_examples: usize,
    tested_examples: usize,
    missing_tests: Vec<String>,
    scanned_files: Vec<String>,
    references: Vec<JsonReference>,
    warnings: Vec<String>,
}

#[derive(Facet)]
struct JsonReference {
    example: String,
    file: String,
    line: usize,
}

fn render_json(reports: &[ValidationReport]) -> Result<String> {
    let output = JsonOutput {
        validations: reports
            .iter()
            .map(|v| JsonReport {
                id: REPORT_ID.to_string(),
                name: v.name.clone(),
                examples_directory: v.examples_dir.display().to_string(),
                tests_directory: v.tests_dir.display().to_string(),
                filter: v.filter.clone(),
                total_examples: v.report.examples.len(),
                tested_examples: v.report.tested(),
                missing_tests: v.report.missing.clone(),
                scanned_files: v
                    .report
                    .scanned_files
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
                references: v
                    .report
                    .references
                    .references
                    .iter()
                    .map(|r| JsonReference {
                        example: r.example.clone(),
                        file: r.file.display().to_string(),
                        line: r.line,
                    })
                    .collect(),
                warnings: v.report.warnings.clone(),
            })
            .collect(),
    };

    let mut json = facet_json::to_string_pretty(&output)
        .map_err(|e| eyre::eyre!("JSON serialization failed: {}", e))?;
    json.push('\n');
    Ok(json)
}

fn render_markdown(validation: &ValidationReport, verbose: bool) -> String {
    let report = &validation.report;
    let mut output = String::new();

    output.push_str(&format!("# {} Example Coverage\n\n", validation.name));
    output.push_str(&format!(
        "**Tested:** {:.1}% ({}/{} examples)\n\n",
        report.coverage_percent(),
        report.tested(),
        report.examples.len()
    ));
    output.push_str(&format!(
        "Examples in `{}`, tests in `{}` matching `{}`.\n\n",
        validation.examples_dir.display(),
        validation.tests_dir.display(),
        validation.filter
    ));

    if !report.warnings.is_empty() {
        output.push_str("## Skipped Test Files\n\n");
        for warning in &report.warnings {
            output.push_str(&format!("- {}\n", warning));
        }
        output.push('\n');
    }

    if !report.missing.is_empty() {
        output.push_str("## Missing Tests\n\n");
        for example in &report.missing {
            output.push_str(&format!("- `{}`\n", example));
        }
        output.push('\n');
    }

    if verbose && !report.examples.is_empty() {
        output.push_str("## Examples\n\n");
        for example in &report.examples {
            output.push_str(&format!(
                "- `{}` ({} references)\n",
                example,
                report.reference_count(example)
            ));
        }
        output.push('\n');
    }

    output
}
