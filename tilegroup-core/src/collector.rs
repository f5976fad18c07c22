//! Pivot a flat summary file into the per-configuration CSV tree.

use std::{
  collections::BTreeSet,
  fs::{self, OpenOptions},
  io::Write,
  path::{Component, Path, PathBuf},
};

use log::{debug, info};

use crate::{category::Category, error::CollectError, record::SummaryRecord};

/// A bucketed CSV row, before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRow {
  /// Leaf directory the row belongs to
  pub directory: PathBuf,
  /// `key , value[ , value]`, without the trailing newline
  pub row: String,
}

/// Outcome of one collection pass.
#[derive(Debug, Default)]
pub struct CollectReport {
  pub rows: usize,
  pub files: BTreeSet<PathBuf>,
}

/// Buckets summary records of one category below `result_dir`.
#[derive(Debug, Clone)]
pub struct Collector {
  category: Category,
  result_dir: PathBuf,
  file_name: String,
}

impl Collector {
  pub fn new(category: Category, result_dir: impl Into<PathBuf>) -> Self {
    Collector {
      category,
      result_dir: result_dir.into(),
      file_name: category.file_name(),
    }
  }

  /// Override the CSV file name written at every leaf.
  pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
    self.file_name = file_name.into();
    self
  }

  pub fn category(&self) -> Category {
    self.category
  }

  pub fn result_dir(&self) -> &Path {
    &self.result_dir
  }

  /// Read the summary file and collect every line of it.
  pub fn collect_file(&self, summary: impl AsRef<Path>) -> Result<CollectReport, CollectError> {
    let path = summary.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CollectError::ReadSummary {
      path: path.to_path_buf(),
      source,
    })?;
    self.collect_lines(content.lines())
  }

  /// Collect summary lines. The first bad record aborts the pass; rows
  /// appended before it stay on disk.
  pub fn collect_lines<I, S>(&self, lines: I) -> Result<CollectReport, CollectError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut report = CollectReport::default();

    for (idx, line) in lines.into_iter().enumerate() {
      let Some(pivot) = self.pivot(idx + 1, line.as_ref())? else {
        continue;
      };
      let path = self.append(&pivot)?;
      report.rows += 1;
      report.files.insert(path);
    }

    info!(
      "{}: collected {} rows into {} files under {}",
      self.category,
      report.rows,
      report.files.len(),
      self.result_dir.display()
    );
    Ok(report)
  }

  /// Decode one summary line into its target directory and CSV row without
  /// touching the filesystem. Blank lines yield `None`.
  pub fn pivot(&self, line: usize, text: &str) -> Result<Option<PivotRow>, CollectError> {
    let Some(record) = SummaryRecord::parse(line, self.category, text) else {
      return Ok(None);
    };
    let rule = self.category.rule();

    let mut directory = self.result_dir.clone();
    for field in rule.path {
      let segment = record.decoded(*field)?;
      if !is_plain_segment(segment) {
        return Err(CollectError::PathSegment {
          line,
          field: *field,
          value: segment.to_string(),
        });
      }
      directory.push(segment);
    }

    let mut row = record.numeric(rule.key)?.to_string();
    for field in rule.values {
      row.push_str(" , ");
      row.push_str(record.numeric(*field)?);
    }

    Ok(Some(PivotRow { directory, row }))
  }

  fn append(&self, pivot: &PivotRow) -> Result<PathBuf, CollectError> {
    let path = pivot.directory.join(&self.file_name);
    let write_err = |source| CollectError::Write {
      path: path.clone(),
      source,
    };

    fs::create_dir_all(&pivot.directory).map_err(write_err)?;
    let mut file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(&path)
      .map_err(write_err)?;
    writeln!(file, "{}", pivot.row).map_err(write_err)?;

    debug!("{} <- {}", path.display(), pivot.row);
    Ok(path)
  }
}

/// Whether `segment` names exactly one directory below its parent.
fn is_plain_segment(segment: &str) -> bool {
  let mut components = Path::new(segment).components();
  match (components.next(), components.next()) {
    (Some(Component::Normal(name)), None) => name == segment,
    _ => false,
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use rstest::rstest;

  use super::*;
  use crate::category::Field;

  const PROJECTIVITY_LINE: &str = "0 1 0.4 0.6 50 0 0 0 0 1000 0 0 0 0 1 123.5";

  #[test]
  fn test_projectivity_pivot() {
    let collector = Collector::new(Category::Projectivity, "/base");
    let pivot = collector.pivot(1, PROJECTIVITY_LINE).unwrap().unwrap();
    assert_eq!(Path::new("/base/row/direct/50/0"), pivot.directory);
    assert_eq!("0.6 , 123.5", pivot.row);
  }

  #[test]
  fn test_distribution_pivot() {
    let collector = Collector::new(Category::Distribution, "/base");
    let pivot = collector.pivot(1, "2 0 17").unwrap().unwrap();
    assert_eq!(Path::new("/base/0"), pivot.directory);
    assert_eq!("2 , 17", pivot.row);
  }

  #[rstest]
  #[case(Category::Selectivity, "/base/row/direct/50/0", "0.4 , 123.5")]
  #[case(Category::Operator, "/base/row/0.6/50/0", "0.4 , 123.5")]
  #[case(Category::Horizontal, "/base/row/1000", "0.4 , 123.5")]
  #[case(Category::Ycsb, "/base/row/direct/0", "0.4 , 123.5")]
  #[case(Category::Subset, "/base/0/0", "0 , 123.5")]
  #[case(Category::Adapt, "/base/row", "0 , 123.5")]
  #[case(Category::Weight, "/base/0", "0 , 123.5")]
  #[case(Category::Reorg, "/base/row/0", "0 , 123.5")]
  #[case(Category::Join, "/base/row/50/0", "0.6 , 123.5")]
  #[case(Category::Hyrise, "/base/row/0.6", "0.4 , 123.5")]
  #[case(Category::Concurrency, "/base/row/0", "1 , 123.5")]
  fn test_category_layouts(
    #[case] category: Category,
    #[case] directory: &str,
    #[case] row: &str,
  ) {
    let collector = Collector::new(category, "/base");
    let pivot = collector.pivot(1, PROJECTIVITY_LINE).unwrap().unwrap();
    assert_eq!(Path::new(directory), pivot.directory);
    assert_eq!(row, pivot.row);
  }

  #[test]
  fn test_caching_writes_three_columns() {
    let collector = Collector::new(Category::Caching, "/base");
    let line = format!("{PROJECTIVITY_LINE} 98765");
    let pivot = collector.pivot(1, &line).unwrap().unwrap();
    assert_eq!(Path::new("/base/row/50/0"), pivot.directory);
    assert_eq!("0.6 , 123.5 , 98765", pivot.row);
  }

  #[test]
  fn test_caching_without_profiler_count_fails() {
    let collector = Collector::new(Category::Caching, "/base");
    assert!(matches!(
      collector.pivot(1, PROJECTIVITY_LINE),
      Err(CollectError::MissingField { index: 16, .. })
    ));
  }

  #[test]
  fn test_unknown_codes_are_kept() {
    let collector = Collector::new(Category::Projectivity, "/base");
    let pivot = collector
      .pivot(1, "7 9 0.4 0.6 50 0 0 0 0 1000 0 0 0 0 1 1")
      .unwrap()
      .unwrap();
    assert_eq!(Path::new("/base/7/9/50/0"), pivot.directory);
  }

  #[rstest]
  #[case("..")]
  #[case(".")]
  #[case("a/b")]
  #[case("/etc")]
  #[case("row/")]
  fn test_path_fields_stay_below_result_dir(#[case] layout: &str) {
    let collector = Collector::new(Category::Projectivity, "/base");
    let line = format!("{layout} 1 0.4 0.6 50 0 0 0 0 1000 0 0 0 0 1 1");
    match collector.pivot(3, &line) {
      Err(CollectError::PathSegment { line, field, value }) => {
        assert_eq!(3, line);
        assert_eq!(Field::Layout, field);
        assert_eq!(layout, value);
      }
      other => panic!("unexpected result {other:?}"),
    }
  }

  #[test]
  fn test_values_are_written_verbatim() {
    let collector = Collector::new(Category::Projectivity, "/base");
    let pivot = collector
      .pivot(1, "1 2 0.40 1.0 200 0.50 0 0 0 1000 0 0 0 0 1 1e3")
      .unwrap()
      .unwrap();
    assert_eq!(Path::new("/base/column/aggregate/200/0.50"), pivot.directory);
    assert_eq!("1.0 , 1e3", pivot.row);
  }
}
