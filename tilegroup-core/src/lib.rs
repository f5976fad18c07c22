//! This crate implements the experiment side of the tile-group layout harness:
//! - Experiment categories and the pivot table that buckets their results
//! - The runner that drives the benchmark binary (directly or under `perf stat`)
//! - The collector that turns the flat summary file into a tree of CSV files
//!
//! A result tree looks like `<results>/<category>/<path fields...>/<category>.csv`,
//! e.g. `results/projectivity/row/direct/50/0/projectivity.csv`, where every row
//! is `<independent variable> , <statistic>`.

pub mod category;
pub mod collector;
pub mod config;
pub mod error;
pub mod experiment;
pub mod record;
pub mod runner;
pub mod traits;

pub use category::{decode_layout, decode_operator, Category, Field, Layout, Operator, PivotRule};
pub use collector::{CollectReport, Collector, PivotRow};
pub use config::{format_param, Config, Sweep};
pub use error::{CollectError, RunError};
pub use experiment::{clean_up_dir, eval, eval_with};
pub use record::SummaryRecord;
pub use runner::{BenchmarkExecutor, Flag, Invocation, ProfiledExecutor};
pub use traits::Executor;
