//! Directory listing for the examples root and the tests root
//!
//! Both roots are read one level deep. Entries come back sorted by file name
//! so repeated runs over the same tree agree on order.

use crate::error::{Error, Result};
use std::fs::FileType;
use std::path::{Path, PathBuf};

struct Entry {
    name: String,
    path: PathBuf,
    file_type: FileType,
}

fn read_entries(root: &Path) -> Result<Vec<Entry>> {
    let dir_err = |source: std::io::Error| Error::DirectoryRead {
        path: root.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(root).map_err(dir_err)? {
        let entry = entry.map_err(dir_err)?;
        let file_type = entry.file_type().map_err(dir_err)?;
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path(),
            file_type,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// List the examples under `root`: the names of its immediate subdirectories.
///
/// Plain files and symlinks are skipped.
pub fn list_examples(root: impl AsRef<Path>) -> Result<Vec<String>> {
    let examples = read_entries(root.as_ref())?
        .into_iter()
        .filter(|entry| entry.file_type.is_dir())
        .map(|entry| entry.name)
        .collect();
    Ok(examples)
}

/// Select the test files directly under `root` whose name contains `filter`.
///
/// Matching is a case-sensitive substring test on the file name only. An
/// empty filter selects every file.
pub fn select_test_files(root: impl AsRef<Path>, filter: &str) -> Result<Vec<PathBuf>> {
    let files = read_entries(root.as_ref())?
        .into_iter()
        .filter(|entry| !entry.file_type.is_dir() && entry.name.contains(filter))
        .map(|entry| entry.path)
        .collect();
    Ok(files)
}
