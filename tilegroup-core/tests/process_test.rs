//! Drives the real process boundary with shell scripts standing in for the
//! benchmark binary and the profiler. Everything lives in one test so no other
//! thread of this binary forks while a script is still open for writing.
#![cfg(unix)]

use std::{fs, os::unix::fs::PermissionsExt, path::Path};

use tilegroup_core::{
  BenchmarkExecutor, Category, Config, Executor, Invocation, ProfiledExecutor, RunError,
};

const SUMMARY_LINE: &str = "0 1 0.4 0.6 50 0 0 0 0 1000 0 0 0 0 1 42.5";

fn write_script(path: &Path, body: &str) {
  fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
  fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_process_boundary() {
  let scratch = tempfile::tempdir().unwrap();
  let dir = scratch.path();
  let summary = dir.join("outputfile.summary");
  let args_file = dir.join("args.txt");
  let config = Config::new(dir, dir.join("results"));

  // The benchmark records its arguments and writes one summary line.
  let benchmark = dir.join("hyadapt");
  write_script(
    &benchmark,
    &format!(
      "echo \"$@\" > '{}'\necho '{SUMMARY_LINE}' > '{}'",
      args_file.display(),
      summary.display()
    ),
  );
  fs::write(&summary, "stale line\n").unwrap();

  let executor = BenchmarkExecutor::new(&benchmark, &summary);
  let lines = executor
    .execute(&Invocation::new(&config, Category::Selectivity))
    .unwrap();
  assert_eq!(vec![SUMMARY_LINE.to_string()], lines);
  assert_eq!(
    "-e 2 -k 1000 -t 3",
    fs::read_to_string(&args_file).unwrap().trim()
  );

  // A failing benchmark that writes nothing must not resurrect the old summary.
  let broken = dir.join("broken");
  write_script(&broken, "exit 3");
  let err = BenchmarkExecutor::new(&broken, &summary)
    .execute(&Invocation::new(&config, Category::Selectivity))
    .unwrap_err();
  assert!(matches!(err, RunError::ReadSummary { .. }));

  // The profiler runs the benchmark and reports on stderr.
  let profiler = dir.join("perf");
  write_script(
    &profiler,
    "shift 3\n\"$@\"\necho ' Performance counter stats:' >&2\necho '     1,234,567      cache-misses:u' >&2",
  );
  let lines = ProfiledExecutor::new(&profiler, &benchmark, &summary)
    .execute(&Invocation::new(&config, Category::Caching))
    .unwrap();
  assert_eq!(vec![format!("{SUMMARY_LINE} 1234567")], lines);
  assert_eq!(
    "-e 12 -k 1000 -t 3",
    fs::read_to_string(&args_file).unwrap().trim()
  );

  // No counter in the report is an error.
  let silent = dir.join("silent-perf");
  write_script(&silent, "shift 3\n\"$@\"");
  let err = ProfiledExecutor::new(&silent, &benchmark, &summary)
    .execute(&Invocation::new(&config, Category::Caching))
    .unwrap_err();
  assert!(matches!(err, RunError::MissingCacheMisses { .. }));

  // Missing binary.
  let err = BenchmarkExecutor::new(dir.join("missing"), &summary)
    .execute(&Invocation::new(&config, Category::Selectivity))
    .unwrap_err();
  assert!(matches!(err, RunError::Spawn { .. }));
}
