use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::warn;

use crate::error::PlotError;

/// What to do when a CSV file does not have the expected number of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
  /// Report the mismatch as an error
  #[default]
  Strict,
  /// Drop extra rows and zero-fill missing ones
  Lenient,
}

/// A rectangular table loaded from one result CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
  rows: Vec<Vec<f64>>,
}

impl Dataset {
  pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
    Dataset { rows }
  }

  pub fn n_rows(&self) -> usize {
    self.rows.len()
  }

  pub fn get(&self, row: usize, col: usize) -> f64 {
    self.rows[row][col]
  }

  pub fn column(&self, col: usize) -> Vec<f64> {
    self.rows.iter().map(|row| row[col]).collect()
  }

  pub fn points(&self, x_col: usize, y_col: usize) -> Vec<(f64, f64)> {
    self.rows.iter().map(|row| (row[x_col], row[y_col])).collect()
  }
}

/// Load `path` as an `n_rows` x `n_cols` table of `key , value[ , value]` rows.
pub fn load_dataset(
  n_rows: usize,
  n_cols: usize,
  path: impl AsRef<Path>,
  policy: RowPolicy,
) -> Result<Dataset, PlotError> {
  let path = path.as_ref();
  let csv_err = |source| PlotError::Csv {
    path: path.to_path_buf(),
    source,
  };

  let mut reader = ReaderBuilder::new()
    .has_headers(false)
    .flexible(true)
    .trim(Trim::All)
    .from_path(path)
    .map_err(csv_err)?;

  let mut rows = Vec::with_capacity(n_rows);
  for (idx, record) in reader.records().enumerate() {
    let record = record.map_err(csv_err)?;
    if record.len() != n_cols {
      return Err(PlotError::ColumnCount {
        path: path.to_path_buf(),
        line: idx + 1,
        expected: n_cols,
        actual: record.len(),
      });
    }
    let row = record
      .iter()
      .map(|value| {
        value.parse::<f64>().map_err(|_| PlotError::Malformed {
          path: path.to_path_buf(),
          line: idx + 1,
          value: value.to_string(),
        })
      })
      .collect::<Result<Vec<f64>, PlotError>>()?;
    rows.push(row);
  }

  if rows.len() != n_rows {
    match policy {
      RowPolicy::Strict => {
        return Err(PlotError::RowCountMismatch {
          path: path.to_path_buf(),
          expected: n_rows,
          actual: rows.len(),
        })
      }
      RowPolicy::Lenient => {
        warn!(
          "{}: expected {} rows, found {}",
          path.display(),
          n_rows,
          rows.len()
        );
        rows.resize(n_rows, vec![0.0; n_cols]);
      }
    }
  }

  Ok(Dataset { rows })
}

pub fn next_power_of_10(n: f64) -> f64 {
  10f64.powf(n.log10().ceil())
}

/// Round `n` up to a multiple of `round`.
pub fn get_upper_bound(n: f64, round: f64) -> f64 {
  (n / round).ceil() * round
}

/// Chart file suffix for a table width: the first column count is "narrow".
pub fn table_type(column_count_idx: usize) -> &'static str {
  if column_count_idx == 0 {
    "narrow"
  } else {
    "wide"
  }
}

/// Chart file suffix for a write ratio.
pub fn write_mix(write_ratio: f64) -> &'static str {
  if write_ratio == 0.0 {
    "rd"
  } else {
    "rw"
  }
}
