//! Missing-test analysis and reporting

use crate::lexer::{References, SourceReference};
use crate::sources::ExtractionResult;
use facet::Facet;
use std::collections::HashSet;
use std::path::PathBuf;

/// Examples that no scanned test file references
#[derive(Debug, Clone, Facet)]
pub struct MissingReport {
    /// Every example found under the examples root, in listing order
    pub examples: Vec<String>,

    /// Examples with no reference, in listing order
    pub missing: Vec<String>,

    /// Test files that were scanned
    pub scanned_files: Vec<PathBuf>,

    /// All references found, including ones to unknown examples
    pub references: References,

    /// Files skipped under the lenient scan policy
    pub warnings: Vec<String>,
}

impl MissingReport {
    /// Build the report from the example listing and the extracted references
    pub fn compute(examples: Vec<String>, extraction: ExtractionResult) -> Self {
        let missing = find_missing(&examples, &extraction.refs);
        MissingReport {
            examples,
            missing,
            scanned_files: extraction.scanned,
            references: extraction.refs,
            warnings: extraction.warnings,
        }
    }

    /// Number of examples with at least one reference
    pub fn tested(&self) -> usize {
        self.examples.len() - self.missing.len()
    }

    /// Whether every example is referenced by some test
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Share of examples that are tested (0.0 - 100.0)
    pub fn coverage_percent(&self) -> f64 {
        if self.examples.is_empty() {
            return 100.0;
        }
        (self.tested() as f64 / self.examples.len() as f64) * 100.0
    }

    /// How many references name `example`
    pub fn reference_count(&self, example: &str) -> usize {
        self.references.examples().filter(|r| *r == example).count()
    }

    /// References whose name matches no example directory
    pub fn unknown_references(&self) -> impl Iterator<Item = &SourceReference> {
        let known: HashSet<&str> = self.examples.iter().map(String::as_str).collect();
        self.references
            .references
            .iter()
            .filter(move |r| !known.contains(r.example.as_str()))
    }
}

/// Examples from `examples` that no reference names, keeping their order
pub fn find_missing(examples: &[String], refs: &References) -> Vec<String> {
    let referenced: HashSet<&str> = refs.examples().collect();
    examples
        .iter()
        .filter(|example| !referenced.contains(example.as_str()))
        .cloned()
        .collect()
}
