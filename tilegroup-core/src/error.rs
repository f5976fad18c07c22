use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::category::{Category, Field};

/// Failures of a collection pass. Any of them aborts the whole pass.
#[derive(Debug, Error)]
pub enum CollectError {
  #[error("failed to read summary file {path}")]
  ReadSummary {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("line {line}: {category} record has {len} fields, `{field}` is at index {index}")]
  MissingField {
    line: usize,
    category: Category,
    field: Field,
    index: usize,
    len: usize,
  },
  #[error("line {line}: `{field}` is not a number: {value:?}")]
  Malformed {
    line: usize,
    field: Field,
    value: String,
  },
  /// A path field that is not a single plain directory name, e.g. `..` or `a/b`.
  #[error("line {line}: `{field}` is not a valid directory name: {value:?}")]
  PathSegment {
    line: usize,
    field: Field,
    value: String,
  },
  #[error("failed to append to {path}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Failures at the benchmark process boundary.
#[derive(Debug, Error)]
pub enum RunError {
  #[error("failed to launch {program}")]
  Spawn {
    program: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("failed to remove stale summary file {path}")]
  Cleanup {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("failed to read summary file {path}")]
  ReadSummary {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("profiler report for `{command}` has no cache-miss count")]
  MissingCacheMisses { command: String },
}
