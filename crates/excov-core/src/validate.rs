//! The validation entry point

use crate::coverage::MissingReport;
use crate::error::Result;
use crate::lexer::References;
use crate::listing::list_examples;
use crate::sources::{DirSources, ScanPolicy};
use std::path::Path;

/// Something that can tell which examples lack tests.
///
/// Host integrations (plugins, CI glue) talk to this trait and translate
/// their own requests and responses around it.
pub trait Validate {
    fn validate(&self, examples_root: &Path, tests_root: &Path, filter: &str)
    -> Result<MissingReport>;
}

/// Lists examples, scans the filtered test files and diffs the two
#[derive(Debug, Clone, Copy, Default)]
pub struct ExamplesValidator {
    policy: ScanPolicy,
}

impl ExamplesValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ScanPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ScanPolicy {
        self.policy
    }
}

impl Validate for ExamplesValidator {
    fn validate(
        &self,
        examples_root: &Path,
        tests_root: &Path,
        filter: &str,
    ) -> Result<MissingReport> {
        let examples = list_examples(examples_root)?;
        tracing::info!(
            root = %examples_root.display(),
            count = examples.len(),
            "listed examples"
        );

        let extraction =
            References::extract(DirSources::new(tests_root, filter).policy(self.policy))?;

        let report = MissingReport::compute(examples, extraction);
        tracing::info!(
            missing = report.missing.len(),
            scanned = report.scanned_files.len(),
            "computed missing tests"
        );
        Ok(report)
    }
}

/// Names of the examples under `examples_root` that no test file under
/// `tests_root` (filtered by `filter`) references.
///
/// Any directory or file error aborts the whole computation.
pub fn compute_missing_tests(
    examples_root: impl AsRef<Path>,
    tests_root: impl AsRef<Path>,
    filter: &str,
) -> Result<Vec<String>> {
    ExamplesValidator::new()
        .validate(examples_root.as_ref(), tests_root.as_ref(), filter)
        .map(|report| report.missing)
}
