//! Source providers for example reference extraction

use crate::error::Result;
use crate::lexer::{References, extract_from_content, extract_from_file};
use crate::listing::select_test_files;
use std::path::{Path, PathBuf};

/// What to do when a single test file cannot be opened or read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanPolicy {
    /// Abort the whole operation on the first file error
    #[default]
    Strict,
    /// Skip the failing file and record a warning
    Lenient,
}

/// Result of extracting references, including any per-file warnings
#[derive(Debug, Default)]
pub struct ExtractionResult {
    pub refs: References,
    /// Files that were scanned to completion
    pub scanned: Vec<PathBuf>,
    /// Files skipped under [`ScanPolicy::Lenient`]
    pub warnings: Vec<String>,
}

impl ExtractionResult {
    fn absorb(&mut self, other: ExtractionResult) {
        self.refs.extend(other.refs);
        self.scanned.extend(other.scanned);
        self.warnings.extend(other.warnings);
    }
}

/// Trait for providing test files to extract example references from
pub trait Sources {
    /// Extract references from all sources
    fn extract(self) -> Result<ExtractionResult>;
}

fn scan_file(path: &Path, policy: ScanPolicy) -> Result<ExtractionResult> {
    tracing::info!(file = %path.display(), "scanning test file");

    let mut result = ExtractionResult::default();
    match extract_from_file(path) {
        Ok(refs) => {
            result.refs = refs;
            result.scanned.push(path.to_path_buf());
        }
        Err(err) if policy == ScanPolicy::Lenient => {
            tracing::warn!(file = %path.display(), error = %err.io_error(), "skipping unreadable test file");
            result.warnings.push(err.describe());
        }
        Err(err) => return Err(err),
    }
    Ok(result)
}

/// Sources from an explicit list of file paths
pub struct PathSources {
    paths: Vec<PathBuf>,
    policy: ScanPolicy,
}

impl PathSources {
    /// Create from an iterator of paths
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            policy: ScanPolicy::default(),
        }
    }

    pub fn policy(mut self, policy: ScanPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Sources for PathSources {
    fn extract(self) -> Result<ExtractionResult> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let policy = self.policy;
            let per_file = self
                .paths
                .par_iter()
                .map(|path| scan_file(path, policy))
                .collect::<Result<Vec<_>>>()?;

            // Batches come back in input order.
            let mut result = ExtractionResult::default();
            for file_result in per_file {
                result.absorb(file_result);
            }
            Ok(result)
        }

        #[cfg(not(feature = "parallel"))]
        {
            let mut result = ExtractionResult::default();
            for path in &self.paths {
                result.absorb(scan_file(path, self.policy)?);
            }
            Ok(result)
        }
    }
}

/// Test files directly under a directory whose name contains a filter
pub struct DirSources {
    root: PathBuf,
    filter: String,
    policy: ScanPolicy,
}

impl DirSources {
    pub fn new(root: impl Into<PathBuf>, filter: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            filter: filter.into(),
            policy: ScanPolicy::default(),
        }
    }

    pub fn policy(mut self, policy: ScanPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Sources for DirSources {
    fn extract(self) -> Result<ExtractionResult> {
        tracing::info!(root = %self.root.display(), filter = %self.filter, "selecting test files");
        let files = select_test_files(&self.root, &self.filter)?;
        PathSources::new(files).policy(self.policy).extract()
    }
}

/// In-memory sources (useful for testing)
pub struct MemorySources(Vec<(PathBuf, String)>);

impl MemorySources {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a file with content
    pub fn add(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.0.push((path.into(), content.into()));
        self
    }
}

impl Default for MemorySources {
    fn default() -> Self {
        Self::new()
    }
}

impl Sources for MemorySources {
    fn extract(self) -> Result<ExtractionResult> {
        let mut result = ExtractionResult::default();
        for (path, content) in self.0 {
            extract_from_content(&path, &content, &mut result.refs);
            result.scanned.push(path);
        }
        Ok(result)
    }
}
