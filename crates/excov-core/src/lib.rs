//! excov-core - Core library for finding untested example configurations
//!
//! A module repository usually ships an `examples/` directory with one
//! subdirectory per example, plus a `tests/` directory whose test files
//! point at those examples:
//!
//! ```text
//! run "basic" {
//!   module {
//!     source = "./examples/basic"
//!   }
//! }
//! ```
//!
//! This crate lists the examples, scans the test files selected by a name
//! filter for `source = "..."` lines mentioning `examples`, and reports the
//! examples nothing points at.
//!
//! # Features
//!
//! - `parallel` - Scan test files on a rayon pool (brings in `rayon`)
//!
//! # Computing Missing Tests
//!
//! ```no_run
//! use excov_core::compute_missing_tests;
//!
//! let missing = compute_missing_tests("examples", "tests", "_test.cfg")?;
//! for example in &missing {
//!     println!("untested: {example}");
//! }
//! # Ok::<(), excov_core::Error>(())
//! ```
//!
//! Use [`ExamplesValidator`] through the [`Validate`] trait to get the full
//! [`MissingReport`], or to skip unreadable test files with
//! [`ScanPolicy::Lenient`] instead of failing.
//!
//! # In-Memory Sources (for testing)
//!
//! ```
//! use excov_core::{MemorySources, References, find_missing};
//!
//! let result = References::extract(
//!     MemorySources::new()
//!         .add("basic_test.cfg", "  source = \"./examples/basic\"")
//!         .add("notes.cfg", "# source = \"./examples/advanced\""),
//! )
//! .unwrap();
//!
//! let examples = vec!["advanced".to_string(), "basic".to_string()];
//! assert_eq!(find_missing(&examples, &result.refs), vec!["advanced"]);
//! ```

mod coverage;
mod error;
mod lexer;
mod listing;
mod sources;
mod validate;

pub use coverage::{MissingReport, find_missing};
pub use error::{Error, Result};
pub use lexer::{References, SourceReference, final_segment, is_source_line};
pub use listing::{list_examples, select_test_files};
pub use sources::{DirSources, ExtractionResult, MemorySources, PathSources, ScanPolicy, Sources};
pub use validate::{ExamplesValidator, Validate, compute_missing_tests};
