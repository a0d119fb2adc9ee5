//! Line scanner for extracting example references from test files
//!
//! Test files are treated as plain line-oriented text. A line counts as an
//! example reference when it is a bare `source = "...examples..."`
//! assignment:
//!
//! ```text
//!   source = "./examples/basic"      -> basic
//!   source = "../../examples/x/y"    -> y
//! # source = "./examples/basic"      -> (nothing, leading comment)
//!   source = "./examples/basic" # hi -> (nothing, trailing content)
//! ```
//!
//! Every quoted string on a matching line is taken, not just the first one.

use crate::error::{Error, Result};
use crate::sources::{ExtractionResult, Sources};
use facet::Facet;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

// Whitespace is ASCII only: tab, newline, form feed, carriage return, space.
static SOURCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[\t\n\f\r ]*source[\t\n\f\r ]*=[\t\n\f\r ]*".+examples.+"$"#)
        .expect("source line pattern is valid")
});

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(.*?)""#).expect("quoted string pattern is valid"));

/// A reference to an example found in a test file
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct SourceReference {
    /// Example name: the last path segment of the quoted string
    pub example: String,
    /// The quoted string as written
    pub raw: String,
    /// File where the reference was found
    pub file: PathBuf,
    /// Line number (1-indexed)
    pub line: usize,
}

/// Collection of example references extracted from test files
#[derive(Debug, Clone, Default, Facet)]
pub struct References {
    pub references: Vec<SourceReference>,
}

impl References {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Extract references from any source
    pub fn extract(sources: impl Sources) -> Result<ExtractionResult> {
        sources.extract()
    }

    /// Extract references from raw content (no I/O)
    pub fn extract_from_content(path: &Path, content: &str) -> Self {
        let mut refs = References::new();
        extract_from_content(path, content, &mut refs);
        refs
    }

    /// Merge another batch into this one
    pub fn extend(&mut self, other: References) {
        self.references.extend(other.references);
    }

    /// Whether any reference names `example`
    pub fn contains(&self, example: &str) -> bool {
        self.references.iter().any(|r| r.example == example)
    }

    /// Iterate over the referenced example names, duplicates included
    pub fn examples(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(|r| r.example.as_str())
    }
}

/// Reduce a quoted path to its last `/`-separated segment.
///
/// Trailing slashes are ignored. An empty string becomes `.` and a string of
/// only slashes becomes `/`.
pub fn final_segment(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Whether `line` is a bare `source = "...examples..."` assignment
pub fn is_source_line(line: &str) -> bool {
    SOURCE_LINE.is_match(line)
}

fn extract_from_line(path: &Path, line_num: usize, line: &str, refs: &mut References) {
    if !is_source_line(line) {
        return;
    }

    for captures in QUOTED.captures_iter(line) {
        let raw = captures.get(1).map_or("", |m| m.as_str());
        let example = final_segment(raw);
        tracing::debug!(file = %path.display(), line = line_num, example, "found example reference");
        refs.references.push(SourceReference {
            example: example.to_string(),
            raw: raw.to_string(),
            file: path.to_path_buf(),
            line: line_num,
        });
    }
}

/// Extract references from in-memory content into `refs`
pub(crate) fn extract_from_content(path: &Path, content: &str, refs: &mut References) {
    for (idx, line) in content.lines().enumerate() {
        extract_from_line(path, idx + 1, line, refs);
    }
}

/// Stream a test file line by line and extract its references.
///
/// The file handle is dropped on every return path, including scan errors.
pub(crate) fn extract_from_file(path: &Path) -> Result<References> {
    let file = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut refs = References::new();
    for (idx, line) in BufReader::new(file).split(b'\n').enumerate() {
        let line_num = idx + 1;
        let mut bytes = line.map_err(|source| Error::FileScan {
            path: path.to_path_buf(),
            line: line_num,
            source,
        })?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        extract_from_line(path, line_num, &String::from_utf8_lossy(&bytes), &mut refs);
    }

    Ok(refs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examples_in(content: &str) -> Vec<String> {
        References::extract_from_content(Path::new("main_test.cfg"), content)
            .examples()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_indented_source_line() {
        assert_eq!(examples_in("  source = \"./examples/a\""), vec!["a"]);
    }

    #[test]
    fn test_source_line_without_spaces() {
        assert_eq!(examples_in("source=\"./examples/basic\""), vec!["basic"]);
    }

    #[test]
    fn test_tab_indentation() {
        assert_eq!(examples_in("\t\tsource\t=\t\"../examples/tabs\""), vec!["tabs"]);
    }

    #[test]
    fn test_unicode_whitespace_is_not_indentation() {
        assert!(examples_in("\u{a0}source = \"./examples/a\"").is_empty());
        assert!(examples_in("\u{2003}source = \"./examples/a\"").is_empty());
        assert!(examples_in("\u{b}source = \"./examples/a\"").is_empty());
        assert!(examples_in("source\u{3000}= \"./examples/a\"").is_empty());
        assert!(examples_in("source =\u{a0}\"./examples/a\"").is_empty());
    }

    #[test]
    fn test_form_feed_is_whitespace() {
        assert_eq!(examples_in("\u{c}source = \"./examples/a\""), vec!["a"]);
    }

    #[test]
    fn test_comment_prefix_is_ignored() {
        assert!(examples_in("# source = \"./examples/a\"").is_empty());
        assert!(examples_in("// source = \"./examples/a\"").is_empty());
        assert!(examples_in("x source = \"./examples/a\"").is_empty());
    }

    #[test]
    fn test_trailing_content_is_ignored() {
        assert!(examples_in("source = \"./examples/a\" # basic").is_empty());
        assert!(examples_in("source = \"./examples/a\",").is_empty());
    }

    #[test]
    fn test_requires_examples_in_string() {
        assert!(examples_in("source = \"./modules/a\"").is_empty());
        assert!(examples_in("source = \"git::https://example.com/a\"").is_empty());
    }

    #[test]
    fn test_other_attributes_are_ignored() {
        assert!(examples_in("module_source = \"./examples/a\"").is_empty());
        assert!(examples_in("sources = \"./examples/a\"").is_empty());
    }

    #[test]
    fn test_multiple_quoted_tokens_on_one_line() {
        assert_eq!(
            examples_in("source = \"./examples/a\" \"./examples/b\""),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_unrelated_quoted_token_is_still_taken() {
        assert_eq!(
            examples_in("source = \"./examples/a\" \"misc\""),
            vec!["a", "misc"]
        );
    }

    #[test]
    fn test_nested_path_normalizes_to_last_segment() {
        assert_eq!(
            examples_in("  source = \"../../examples/group/basic\""),
            vec!["basic"]
        );
    }

    #[test]
    fn test_line_numbers_and_raw_text() {
        let refs = References::extract_from_content(
            Path::new("main_test.cfg"),
            "run \"basic\" {\n  module {\n    source = \"./examples/basic\"\n  }\n}\n",
        );

        assert_eq!(refs.len(), 1);
        let r = &refs.references[0];
        assert_eq!(r.example, "basic");
        assert_eq!(r.raw, "./examples/basic");
        assert_eq!(r.line, 3);
        assert_eq!(r.file, PathBuf::from("main_test.cfg"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "run \"a\" {\r\n  source = \"./examples/a\"\r\n}\r\n";
        assert_eq!(examples_in(content), vec!["a"]);
    }

    #[test]
    fn test_duplicates_are_kept_in_the_list() {
        let refs = References::extract_from_content(
            Path::new("t"),
            "source = \"./examples/a\"\nsource = \"../examples/a\"\n",
        );
        assert_eq!(refs.len(), 2);
        assert!(refs.contains("a"));
        assert!(!refs.contains("b"));
    }

    #[test]
    fn test_final_segment() {
        assert_eq!(final_segment("./examples/basic"), "basic");
        assert_eq!(final_segment("../examples/basic"), "basic");
        assert_eq!(final_segment("../../examples/group/basic"), "basic");
        assert_eq!(final_segment("./examples/basic/"), "basic");
        assert_eq!(final_segment("basic"), "basic");
        assert_eq!(final_segment(""), ".");
        assert_eq!(final_segment("///"), "/");
    }

    #[test]
    fn test_extract_from_file_streams_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("basic_test.cfg");
        std::fs::write(
            &path,
            "run \"basic\" {\n  module {\n    source = \"./examples/basic\"\n  }\n}\n",
        )
        .unwrap();

        let refs = extract_from_file(&path).unwrap();
        assert_eq!(refs.examples().collect::<Vec<_>>(), vec!["basic"]);
        assert_eq!(refs.references[0].line, 3);
    }

    #[test]
    fn test_extract_from_file_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary_test.cfg");
        let mut bytes = b"# \xff\xfe junk\n".to_vec();
        bytes.extend_from_slice(b"source = \"./examples/raw\"\n");
        std::fs::write(&path, bytes).unwrap();

        let refs = extract_from_file(&path).unwrap();
        assert_eq!(refs.examples().collect::<Vec<_>>(), vec!["raw"]);
    }

    #[test]
    fn test_extract_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone_test.cfg");

        let err = extract_from_file(&path).unwrap_err();
        assert!(matches!(err, Error::FileOpen { .. }));
        assert_eq!(err.path(), path);
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_from_directory_is_a_scan_error() {
        // Opening a directory succeeds on unix, reading it does not.
        let dir = tempfile::tempdir().unwrap();

        let err = extract_from_file(dir.path()).unwrap_err();
        assert!(matches!(err, Error::FileScan { line: 1, .. }));
    }
}
