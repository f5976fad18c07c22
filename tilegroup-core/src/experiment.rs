//! The clean → run → collect pipeline of one experiment category.

use std::{fs, io, path::Path};

use anyhow::{Context, Result};
use log::info;

use crate::{
  category::Category,
  collector::{CollectReport, Collector},
  config::Config,
  runner::{self, BenchmarkExecutor, ProfiledExecutor},
  traits::Executor,
};

/// Recursively delete `dir` and recreate it empty.
pub fn clean_up_dir(dir: impl AsRef<Path>) -> io::Result<()> {
  let dir = dir.as_ref();
  match fs::remove_dir_all(dir) {
    Ok(()) => {}
    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
    Err(e) => return Err(e),
  }
  fs::create_dir_all(dir)
}

/// Run one category against the real benchmark binary. The cache-miss
/// experiment goes through the profiler.
pub fn eval(config: &Config, category: Category) -> Result<CollectReport> {
  match category {
    Category::Caching => eval_with(config, category, &ProfiledExecutor::from_config(config)),
    _ => eval_with(config, category, &BenchmarkExecutor::from_config(config)),
  }
}

/// Clean the category's result directory, run its invocations through
/// `executor`, and collect the summary lines into the result tree.
pub fn eval_with<E: Executor>(
  config: &Config,
  category: Category,
  executor: &E,
) -> Result<CollectReport> {
  let result_dir = config.result_dir(category);
  info!("{category}: cleaning {}", result_dir.display());
  clean_up_dir(&result_dir)
    .with_context(|| format!("failed to clean result directory {}", result_dir.display()))?;

  let invocations = runner::invocations(config, category);
  let lines = runner::run(executor, &invocations)
    .with_context(|| format!("{category} experiment failed"))?;

  Collector::new(category, result_dir)
    .collect_lines(&lines)
    .with_context(|| format!("failed to collect {category} stats"))
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  #[test]
  fn test_clean_up_dir_recreates_empty() {
    let scratch = tempfile::tempdir().unwrap();
    let dir = scratch.path().join("results/projectivity");
    fs::create_dir_all(dir.join("row/direct")).unwrap();
    fs::write(dir.join("row/direct/projectivity.csv"), "0.2 , 1\n").unwrap();

    clean_up_dir(&dir).unwrap();

    assert!(dir.is_dir());
    assert_eq!(0, fs::read_dir(&dir).unwrap().count());
  }

  #[test]
  fn test_clean_up_dir_missing_is_created() {
    let scratch = tempfile::tempdir().unwrap();
    let dir = scratch.path().join("fresh");
    clean_up_dir(&dir).unwrap();
    assert!(dir.is_dir());
  }
}
