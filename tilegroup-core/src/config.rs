//! Immutable experiment configuration: where things live and which parameter
//! grid the benchmark sweeps.

use std::path::{Path, PathBuf};

use crate::category::{Category, Layout, Operator};

pub const DEFAULT_SUMMARY_FILE: &str = "outputfile.summary";
pub const DEFAULT_PROFILER: &str = "perf";

/// Paths and shared benchmark parameters.
#[derive(Debug, Clone)]
pub struct Config {
  /// The benchmark executable
  pub binary: PathBuf,
  /// Root of the result tree; each category owns `<results_dir>/<category>`
  pub results_dir: PathBuf,
  /// Summary file the benchmark writes, relative to the working directory
  pub summary_file: PathBuf,
  /// System profiler used for the cache-miss experiment
  pub profiler: PathBuf,
  pub scale_factor: f64,
  pub transaction_count: u32,
  pub sweep: Sweep,
}

impl Config {
  /// Configuration for a benchmark built under `build_dir`, writing results
  /// below `results_dir`.
  pub fn new(build_dir: impl AsRef<Path>, results_dir: impl Into<PathBuf>) -> Self {
    Config {
      binary: build_dir.as_ref().join("src").join("hyadapt"),
      results_dir: results_dir.into(),
      summary_file: PathBuf::from(DEFAULT_SUMMARY_FILE),
      profiler: PathBuf::from(DEFAULT_PROFILER),
      scale_factor: 1000.0,
      transaction_count: 3,
      sweep: Sweep::default(),
    }
  }

  pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
    self.binary = binary.into();
    self
  }

  pub fn with_summary_file(mut self, summary_file: impl Into<PathBuf>) -> Self {
    self.summary_file = summary_file.into();
    self
  }

  pub fn with_profiler(mut self, profiler: impl Into<PathBuf>) -> Self {
    self.profiler = profiler.into();
    self
  }

  pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
    self.scale_factor = scale_factor;
    self
  }

  pub fn with_transaction_count(mut self, transaction_count: u32) -> Self {
    self.transaction_count = transaction_count;
    self
  }

  pub fn with_sweep(mut self, sweep: Sweep) -> Self {
    self.sweep = sweep;
    self
  }

  /// Result directory of one category.
  pub fn result_dir(&self, category: Category) -> PathBuf {
    self.results_dir.join(category.name())
  }
}

/// The parameter grid. The collector never reads it; the runner uses it to
/// drive per-combination invocations and the plotter to find the CSV tree.
#[derive(Debug, Clone)]
pub struct Sweep {
  pub layouts: Vec<Layout>,
  pub operators: Vec<Operator>,
  pub selectivity: Vec<f64>,
  pub projectivity: Vec<f64>,
  /// Projectivity values of the operator and hyrise experiments
  pub op_projectivity: Vec<f64>,
  /// Narrow and wide table
  pub column_counts: Vec<u32>,
  /// Read-only and read-write mix
  pub write_ratios: Vec<f64>,
  pub tuples_per_tilegroup: Vec<u64>,
  pub subset_types: Vec<u32>,
  pub access_num_groups: Vec<u32>,
  pub subset_ratios: Vec<f64>,
  pub sample_weights: Vec<f64>,
  /// Low and high skew
  pub thetas: Vec<f64>,
  pub thread_counts: Vec<u32>,
  pub tile_group_types: Vec<u32>,
  /// Queries per adapt/weight/reorg run
  pub adapt_queries: usize,
  /// Queries per scan or insert phase of the adapt workload
  pub adapt_phase_length: usize,
  pub distribution_queries: usize,
}

impl Default for Sweep {
  fn default() -> Self {
    Sweep {
      layouts: Layout::ALL.to_vec(),
      operators: vec![Operator::Direct, Operator::Aggregate, Operator::Arithmetic],
      selectivity: vec![0.2, 0.4, 0.6, 0.8, 1.0],
      projectivity: vec![0.2, 0.4, 0.6, 0.8, 1.0],
      op_projectivity: vec![0.1, 1.0],
      column_counts: vec![50, 200],
      write_ratios: vec![0.0, 0.5],
      tuples_per_tilegroup: vec![10, 100, 1000, 10000, 100000],
      subset_types: vec![1, 2],
      access_num_groups: vec![1, 2, 4, 8],
      subset_ratios: vec![0.2, 0.4, 0.6, 0.8, 1.0],
      sample_weights: vec![0.0001, 0.001, 0.01, 0.1],
      thetas: vec![0.0, 0.9],
      thread_counts: vec![1, 2, 4, 8, 16],
      tile_group_types: vec![0, 1, 2, 3, 4],
      adapt_queries: 200,
      adapt_phase_length: 50,
      distribution_queries: 20,
    }
  }
}

/// Render a sweep parameter the way the benchmark prints it, so directory
/// names built from the sweep match the ones built from summary records.
pub fn format_param(value: f64) -> String {
  format!("{value}")
}

#[cfg(test)]
mod tests {
  use rstest::rstest;

  use super::*;

  #[rstest]
  #[case(1.0, "1")]
  #[case(0.0, "0")]
  #[case(0.5, "0.5")]
  #[case(0.1, "0.1")]
  #[case(0.0001, "0.0001")]
  #[case(1000.0, "1000")]
  fn test_format_param(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(expected, format_param(value));
  }

  #[test]
  fn test_result_dir_per_category() {
    let config = Config::new("/peloton/build", "/results");
    assert_eq!(Path::new("/peloton/build/src/hyadapt"), config.binary);
    assert_eq!(
      Path::new("/results/projectivity"),
      config.result_dir(Category::Projectivity)
    );
  }
}
