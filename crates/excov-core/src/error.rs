//! Errors raised while listing directories and scanning test files

use std::io;
use std::path::{Path, PathBuf};

/// Everything that can go wrong while computing missing tests.
///
/// Each variant keeps the path it was working on and the underlying I/O
/// error, so callers can report exactly which file or directory failed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The examples root or tests root could not be listed
    #[error("failed to read directory {}", .path.display())]
    DirectoryRead { path: PathBuf, source: io::Error },

    /// A selected test file could not be opened
    #[error("failed to open test file {}", .path.display())]
    FileOpen { path: PathBuf, source: io::Error },

    /// Reading a test file failed partway through
    #[error("failed to scan {} at line {line}", .path.display())]
    FileScan {
        path: PathBuf,
        /// 1-indexed line that was being read
        line: usize,
        source: io::Error,
    },
}

impl Error {
    /// The directory or file the error is about
    pub fn path(&self) -> &Path {
        match self {
            Error::DirectoryRead { path, .. }
            | Error::FileOpen { path, .. }
            | Error::FileScan { path, .. } => path,
        }
    }

    /// The I/O error that caused this failure
    pub fn io_error(&self) -> &io::Error {
        match self {
            Error::DirectoryRead { source, .. }
            | Error::FileOpen { source, .. }
            | Error::FileScan { source, .. } => source,
        }
    }

    /// One-line description including the underlying cause
    pub fn describe(&self) -> String {
        format!("{}: {}", self, self.io_error())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
