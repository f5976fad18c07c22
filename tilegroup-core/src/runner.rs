//! Invocation of the external benchmark binary.

use std::{
  fs, io,
  path::{Path, PathBuf},
  process::Command,
};

use log::{info, warn};

use crate::{
  category::Category,
  config::{format_param, Config},
  error::RunError,
  traits::Executor,
};

/// Optional per-invocation flags of the benchmark binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
  Layout,
  Operator,
  Selectivity,
  Projectivity,
  ColumnCount,
  WriteRatio,
  TuplesPerTilegroup,
}

impl Flag {
  pub fn switch(self) -> &'static str {
    match self {
      Flag::Layout => "-l",
      Flag::Operator => "-o",
      Flag::Selectivity => "-s",
      Flag::Projectivity => "-p",
      Flag::ColumnCount => "-c",
      Flag::WriteRatio => "-w",
      Flag::TuplesPerTilegroup => "-g",
    }
  }
}

/// One run of the benchmark binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
  pub category: Category,
  pub scale_factor: f64,
  pub transaction_count: u32,
  pub extra: Vec<(Flag, String)>,
}

impl Invocation {
  pub fn new(config: &Config, category: Category) -> Self {
    Invocation {
      category,
      scale_factor: config.scale_factor,
      transaction_count: config.transaction_count,
      extra: Vec::new(),
    }
  }

  pub fn with_flag(mut self, flag: Flag, value: impl ToString) -> Self {
    self.extra.push((flag, value.to_string()));
    self
  }

  /// Command line arguments: `-e <category> -k <scale> -t <count>` followed by
  /// the extra flags in insertion order.
  pub fn args(&self) -> Vec<String> {
    let mut args = vec![
      "-e".to_string(),
      self.category.code().to_string(),
      "-k".to_string(),
      format_param(self.scale_factor),
      "-t".to_string(),
      self.transaction_count.to_string(),
    ];
    for (flag, value) in &self.extra {
      args.push(flag.switch().to_string());
      args.push(value.clone());
    }
    args
  }
}

/// The invocations needed to run one experiment category.
///
/// The cache-miss experiment profiles every (layout, column count, write
/// ratio, projectivity) combination separately so that each counter reading
/// belongs to exactly one configuration. Every other category is a single run
/// in which the binary sweeps its own grid.
pub fn invocations(config: &Config, category: Category) -> Vec<Invocation> {
  if category != Category::Caching {
    return vec![Invocation::new(config, category)];
  }

  let sweep = &config.sweep;
  let mut result = Vec::new();
  for layout in &sweep.layouts {
    for column_count in &sweep.column_counts {
      for write_ratio in &sweep.write_ratios {
        for projectivity in &sweep.projectivity {
          result.push(
            Invocation::new(config, category)
              .with_flag(Flag::Layout, layout.code())
              .with_flag(Flag::ColumnCount, column_count)
              .with_flag(Flag::WriteRatio, format_param(*write_ratio))
              .with_flag(Flag::Projectivity, format_param(*projectivity)),
          );
        }
      }
    }
  }
  result
}

/// Run every invocation in order and concatenate the summary lines.
pub fn run<E: Executor>(executor: &E, invocations: &[Invocation]) -> Result<Vec<String>, RunError> {
  let mut lines = Vec::new();
  for invocation in invocations {
    lines.extend(executor.execute(invocation)?);
  }
  Ok(lines)
}

/// Runs the benchmark binary directly and reads back its summary file.
#[derive(Debug, Clone)]
pub struct BenchmarkExecutor {
  binary: PathBuf,
  summary_file: PathBuf,
}

impl BenchmarkExecutor {
  pub fn new(binary: impl Into<PathBuf>, summary_file: impl Into<PathBuf>) -> Self {
    BenchmarkExecutor {
      binary: binary.into(),
      summary_file: summary_file.into(),
    }
  }

  pub fn from_config(config: &Config) -> Self {
    Self::new(&config.binary, &config.summary_file)
  }
}

impl Executor for BenchmarkExecutor {
  fn execute(&self, invocation: &Invocation) -> Result<Vec<String>, RunError> {
    remove_summary(&self.summary_file)?;

    let args = invocation.args();
    info!("{} {}", self.binary.display(), args.join(" "));
    let status = Command::new(&self.binary)
      .args(&args)
      .status()
      .map_err(|source| RunError::Spawn {
        program: self.binary.clone(),
        source,
      })?;
    if !status.success() {
      warn!("{} exited with {status}", self.binary.display());
    }

    read_summary(&self.summary_file)
  }
}

/// Runs the benchmark binary under `perf stat` and appends the counted event
/// to every summary line of the run.
#[derive(Debug, Clone)]
pub struct ProfiledExecutor {
  profiler: PathBuf,
  binary: PathBuf,
  summary_file: PathBuf,
  event: String,
}

impl ProfiledExecutor {
  pub fn new(
    profiler: impl Into<PathBuf>,
    binary: impl Into<PathBuf>,
    summary_file: impl Into<PathBuf>,
  ) -> Self {
    ProfiledExecutor {
      profiler: profiler.into(),
      binary: binary.into(),
      summary_file: summary_file.into(),
      event: "cache-misses".to_string(),
    }
  }

  pub fn from_config(config: &Config) -> Self {
    Self::new(&config.profiler, &config.binary, &config.summary_file)
  }
}

impl Executor for ProfiledExecutor {
  fn execute(&self, invocation: &Invocation) -> Result<Vec<String>, RunError> {
    remove_summary(&self.summary_file)?;

    let args = invocation.args();
    let command = format!(
      "{} stat -e {} {} {}",
      self.profiler.display(),
      self.event,
      self.binary.display(),
      args.join(" ")
    );
    info!("{command}");

    let output = Command::new(&self.profiler)
      .args(["stat", "-e", self.event.as_str()])
      .arg(&self.binary)
      .args(&args)
      .output()
      .map_err(|source| RunError::Spawn {
        program: self.profiler.clone(),
        source,
      })?;
    if !output.status.success() {
      warn!("{} exited with {}", self.profiler.display(), output.status);
    }

    // perf prints its report on stderr
    let report = String::from_utf8_lossy(&output.stderr);
    let count =
      parse_counter(&report, &self.event).ok_or(RunError::MissingCacheMisses { command })?;
    info!("{}: {count}", self.event);

    let lines = read_summary(&self.summary_file)?;
    Ok(
      lines
        .into_iter()
        .map(|line| {
          if line.trim().is_empty() {
            line
          } else {
            format!("{line} {count}")
          }
        })
        .collect(),
    )
  }
}

/// Extract the count of `event` from a `perf stat` text report, e.g.
/// `     1,234,567      cache-misses:u`.
pub fn parse_counter(report: &str, event: &str) -> Option<u64> {
  report.lines().find_map(|line| {
    let mut tokens = line.split_whitespace();
    let count = tokens.next()?;
    let name = tokens.next()?;
    if !name.starts_with(event) {
      return None;
    }
    count
      .chars()
      .filter(|c| !matches!(c, ',' | '.' | '\''))
      .collect::<String>()
      .parse()
      .ok()
  })
}

fn remove_summary(path: &Path) -> Result<(), RunError> {
  match fs::remove_file(path) {
    Ok(()) => Ok(()),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
    Err(source) => Err(RunError::Cleanup {
      path: path.to_path_buf(),
      source,
    }),
  }
}

fn read_summary(path: &Path) -> Result<Vec<String>, RunError> {
  let content = fs::read_to_string(path).map_err(|source| RunError::ReadSummary {
    path: path.to_path_buf(),
    source,
  })?;
  Ok(content.lines().map(str::to_string).collect())
}
