use std::{
  cell::RefCell,
  collections::BTreeSet,
  fs,
  path::{Path, PathBuf},
};

use tilegroup_core::{
  eval_with, Category, CollectError, Collector, Config, Executor, Invocation, RunError,
};

/// Every (layout, operator, column count, write ratio, projectivity) point of a
/// projectivity run, with the stat derived from the line number.
fn projectivity_grid() -> Vec<String> {
  let mut lines = Vec::new();
  for layout in 0..3 {
    for operator in 1..=3 {
      for column_count in [50, 200] {
        for write_ratio in ["0", "0.5"] {
          for projectivity in ["0.2", "0.4", "0.6", "0.8", "1"] {
            lines.push(format!(
              "{layout} {operator} 0.4 {projectivity} {column_count} {write_ratio} 0 0 0 1000 0 0 0 0 1 {}.25",
              lines.len()
            ));
          }
        }
      }
    }
  }
  lines
}

fn read_rows(path: &Path) -> Vec<String> {
  fs::read_to_string(path)
    .unwrap()
    .lines()
    .map(str::to_string)
    .collect()
}

#[test]
fn test_projectivity_scenario() {
  let scratch = tempfile::tempdir().unwrap();
  let base = scratch.path().join("projectivity");

  Collector::new(Category::Projectivity, &base)
    .collect_lines(["0 1 0.4 0.6 50 0 0 0 0 1000 0 0 0 0 1 42.5"])
    .unwrap();

  let rows = read_rows(&base.join("row/direct/50/0/projectivity.csv"));
  assert_eq!(vec!["0.6 , 42.5"], rows);
}

#[test]
fn test_distribution_scenario() {
  let scratch = tempfile::tempdir().unwrap();
  let base = scratch.path().join("distribution");

  Collector::new(Category::Distribution, &base)
    .collect_lines(["2 0 31", "3 0 29", "2 1 4"])
    .unwrap();

  assert_eq!(vec!["2 , 31", "3 , 29"], read_rows(&base.join("0/distribution.csv")));
  assert_eq!(vec!["2 , 4"], read_rows(&base.join("1/distribution.csv")));
}

#[test]
fn test_every_line_becomes_one_row() {
  let scratch = tempfile::tempdir().unwrap();
  let base = scratch.path().join("projectivity");
  let lines = projectivity_grid();

  let report = Collector::new(Category::Projectivity, &base)
    .collect_lines(&lines)
    .unwrap();

  assert_eq!(lines.len(), report.rows);
  // layouts x operators x column counts x write ratios
  assert_eq!(3 * 3 * 2 * 2, report.files.len());

  let mut written: BTreeSet<String> = BTreeSet::new();
  for file in &report.files {
    let rows = read_rows(file);
    assert_eq!(5, rows.len(), "{}", file.display());
    written.extend(rows);
  }
  assert_eq!(lines.len(), written.len());

  // Values are kept verbatim: "1" stays "1", stats keep their formatting.
  let wide_rw = base.join("hybrid/arithmetic/200/0.5/projectivity.csv");
  assert_eq!(
    vec!["0.2 , 175.25", "0.4 , 176.25", "0.6 , 177.25", "0.8 , 178.25", "1 , 179.25"],
    read_rows(&wide_rw)
  );
}

#[test]
fn test_collecting_twice_doubles_rows() {
  let scratch = tempfile::tempdir().unwrap();
  let base = scratch.path().join("selectivity");
  let lines = projectivity_grid();
  let collector = Collector::new(Category::Selectivity, &base);

  let first = collector.collect_lines(&lines).unwrap();
  let counts: Vec<usize> = first.files.iter().map(|f| read_rows(f).len()).collect();

  let second = collector.collect_lines(&lines).unwrap();
  assert_eq!(first.files, second.files);
  for (file, count) in second.files.iter().zip(counts) {
    assert_eq!(count * 2, read_rows(file).len());
  }
}

#[test]
fn test_custom_file_name() {
  let scratch = tempfile::tempdir().unwrap();
  let collector = Collector::new(Category::Adapt, scratch.path()).with_file_name("run-2.csv");
  let report = collector
    .collect_lines(["2 0 0 0 0 0 0 0 0 1000 17 0 0 0 1 3.5"])
    .unwrap();
  assert_eq!(
    BTreeSet::from([scratch.path().join("hybrid/run-2.csv")]),
    report.files
  );
}

#[test]
fn test_short_record_aborts_pass() {
  let scratch = tempfile::tempdir().unwrap();
  let base = scratch.path().join("projectivity");
  let lines = [
    "0 1 0.4 0.6 50 0 0 0 0 1000 0 0 0 0 1 42.5",
    "0 1 0.4 0.8 50 0",
    "0 1 0.4 1 50 0 0 0 0 1000 0 0 0 0 1 43.5",
  ];

  let err = Collector::new(Category::Projectivity, &base)
    .collect_lines(lines)
    .unwrap_err();
  match err {
    CollectError::MissingField { line, len, .. } => {
      assert_eq!(2, line);
      assert_eq!(6, len);
    }
    other => panic!("unexpected {other:?}"),
  }

  // Rows before the bad record stay, nothing after it is written.
  assert_eq!(
    vec!["0.6 , 42.5"],
    read_rows(&base.join("row/direct/50/0/projectivity.csv"))
  );
}

#[test]
fn test_malformed_stat_aborts_pass() {
  let scratch = tempfile::tempdir().unwrap();
  let err = Collector::new(Category::Projectivity, scratch.path())
    .collect_lines(["0 1 0.4 0.6 50 0 0 0 0 1000 0 0 0 0 1 n/a"])
    .unwrap_err();
  assert!(matches!(err, CollectError::Malformed { line: 1, .. }));
}

#[test]
fn test_collect_file_reads_summary() {
  let scratch = tempfile::tempdir().unwrap();
  let summary = scratch.path().join("outputfile.summary");
  fs::write(&summary, "\n1 3 0.2 0.1 50 0 0 0 0 1000 0 0 0 0 1 9\n\n").unwrap();

  let report = Collector::new(Category::Operator, scratch.path().join("operator"))
    .collect_file(&summary)
    .unwrap();
  assert_eq!(1, report.rows);
  assert_eq!(
    vec!["0.2 , 9"],
    read_rows(&scratch.path().join("operator/column/0.1/50/0/operator.csv"))
  );
}

#[test]
fn test_collect_file_missing_summary() {
  let scratch = tempfile::tempdir().unwrap();
  let err = Collector::new(Category::Operator, scratch.path())
    .collect_file(scratch.path().join("nope.summary"))
    .unwrap_err();
  assert!(matches!(err, CollectError::ReadSummary { .. }));
}

/// Replays canned summary lines and remembers what it was asked to run.
struct CannedExecutor {
  lines: Vec<String>,
  seen: RefCell<Vec<Vec<String>>>,
}

impl Executor for CannedExecutor {
  fn execute(&self, invocation: &Invocation) -> Result<Vec<String>, RunError> {
    self.seen.borrow_mut().push(invocation.args());
    Ok(self.lines.clone())
  }
}

#[test]
fn test_eval_cleans_runs_and_collects() {
  let scratch = tempfile::tempdir().unwrap();
  let config = Config::new("/build", scratch.path());
  let result_dir: PathBuf = config.result_dir(Category::Projectivity);
  fs::create_dir_all(result_dir.join("stale")).unwrap();

  let executor = CannedExecutor {
    lines: projectivity_grid(),
    seen: RefCell::new(Vec::new()),
  };

  let report = eval_with(&config, Category::Projectivity, &executor).unwrap();
  assert_eq!(180, report.rows);
  assert!(!result_dir.join("stale").exists());
  assert_eq!(
    vec![vec!["-e", "1", "-k", "1000", "-t", "3"]],
    *executor.seen.borrow()
  );

  // A second eval starts from a clean tree, so row counts do not grow.
  let report = eval_with(&config, Category::Projectivity, &executor).unwrap();
  for file in &report.files {
    assert_eq!(5, read_rows(file).len());
  }
}

#[test]
fn test_eval_caching_runs_every_combination() {
  let scratch = tempfile::tempdir().unwrap();
  let config = Config::new("/build", scratch.path());
  let executor = CannedExecutor {
    lines: vec!["0 0 1 0.2 50 0 0 0 0 1000 0 0 0 0 1 8.5 1200".to_string()],
    seen: RefCell::new(Vec::new()),
  };

  let report = eval_with(&config, Category::Caching, &executor).unwrap();
  assert_eq!(60, executor.seen.borrow().len());
  assert_eq!(60, report.rows);
  let rows = read_rows(
    &config
      .result_dir(Category::Caching)
      .join("row/50/0/caching.csv"),
  );
  assert_eq!(60, rows.len());
  assert!(rows.iter().all(|row| row == "0.2 , 8.5 , 1200"));
}
