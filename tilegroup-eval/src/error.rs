use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
  #[error("failed to read {path}")]
  Csv {
    path: PathBuf,
    #[source]
    source: csv::Error,
  },
  #[error("{path}:{line}: {value:?} is not a number")]
  Malformed {
    path: PathBuf,
    line: usize,
    value: String,
  },
  #[error("{path}:{line}: expected {expected} columns, found {actual}")]
  ColumnCount {
    path: PathBuf,
    line: usize,
    expected: usize,
    actual: usize,
  },
  /// The file has more or fewer rows than the experiment produces, typically
  /// because it was collected more than once without cleaning the result tree.
  #[error("{path}: expected {expected} rows, found {actual}")]
  RowCountMismatch {
    path: PathBuf,
    expected: usize,
    actual: usize,
  },
}
