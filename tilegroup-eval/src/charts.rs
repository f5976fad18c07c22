//! Per-category chart construction.
//!
//! Every category has a `create_*` function that turns loaded datasets into a
//! [`Figure`] and a `*_plot` driver that walks the configuration grid, loads
//! the CSV files written by the collector, and hands each figure to a
//! [`FigureSink`].

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;
use tilegroup_core::{format_param, Category, Config, Layout, Sweep};

use crate::{
  figure::{Annotation, Axis, ChartKind, Figure, Series},
  render::FigureSink,
  style::PlotStyle,
  util::{get_upper_bound, load_dataset, next_power_of_10, table_type, write_mix, Dataset, RowPolicy},
};

const EXECUTION_TIME: &str = "Execution time (ms)";
const QUERY_SEQUENCE: &str = "Query Sequence";

/// Everything a plot driver needs besides the sink.
#[derive(Debug, Clone, Copy)]
pub struct PlotContext<'a> {
  pub config: &'a Config,
  pub style: &'a PlotStyle,
  pub policy: RowPolicy,
}

impl<'a> PlotContext<'a> {
  pub fn new(config: &'a Config, style: &'a PlotStyle, policy: RowPolicy) -> Self {
    PlotContext {
      config,
      style,
      policy,
    }
  }

  /// Path of the CSV file below the category's result directory.
  pub fn data_file(&self, category: Category, segments: &[&str]) -> PathBuf {
    let mut path = self.config.result_dir(category);
    path.extend(segments);
    path.push(category.file_name());
    path
  }

  fn load(&self, category: Category, segments: &[&str], n_rows: usize, n_cols: usize) -> Result<Dataset> {
    let path = self.data_file(category, segments);
    let dataset = load_dataset(n_rows, n_cols, &path, self.policy)
      .with_context(|| format!("failed to load {category} data"))?;
    debug!("{}: {:?}", path.display(), dataset);
    Ok(dataset)
  }

  fn load_layouts(&self, category: Category, tail: &[&str], n_rows: usize, n_cols: usize) -> Result<Vec<Dataset>> {
    self
      .config
      .sweep
      .layouts
      .iter()
      .map(|layout| {
        let mut segments = vec![layout.name()];
        segments.extend_from_slice(tail);
        self.load(category, &segments, n_rows, n_cols)
      })
      .collect()
  }
}

/// Render every chart of `category`, returning the written files.
pub fn plot(category: Category, ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  match category {
    Category::Projectivity => projectivity_plot(ctx, sink),
    Category::Selectivity => selectivity_plot(ctx, sink),
    Category::Operator => operator_plot(ctx, sink),
    Category::Horizontal => horizontal_plot(ctx, sink),
    Category::Ycsb => ycsb_plot(ctx, sink),
    Category::Subset => subset_plot(ctx, sink),
    Category::Adapt => adapt_plot(ctx, sink),
    Category::Weight => weight_plot(ctx, sink),
    Category::Reorg => reorg_plot(ctx, sink),
    Category::Distribution => distribution_plot(ctx, sink),
    Category::Join => join_plot(ctx, sink),
    Category::Caching => caching_plot(ctx, sink),
    Category::Hyrise => hyrise_plot(ctx, sink),
    Category::Concurrency => concurrency_plot(ctx, sink),
  }
}

///////////////////////////////////////////////////////////////////////////////
// Builders
///////////////////////////////////////////////////////////////////////////////

/// One line per dataset: `x_values[i]` against column `y_col` of row `i`.
fn line_chart(
  datasets: &[Dataset],
  labels: &[String],
  x_values: &[f64],
  y_col: usize,
  x: Axis,
  y: Axis,
  style: &PlotStyle,
) -> Figure {
  let mut figure = Figure::new(ChartKind::Line, x, y);
  for (idx, (dataset, label)) in datasets.iter().zip(labels).enumerate() {
    let points = x_values
      .iter()
      .enumerate()
      .map(|(row, x)| (*x, dataset.get(row, y_col)))
      .collect();
    debug!("{label} group_data = {points:?}");
    figure.series.push(Series {
      label: label.clone(),
      points,
      style: style.series(ChartKind::Line, idx),
    });
  }
  figure
}

/// One line per dataset, plotting column 1 against column 0.
fn sequence_chart(datasets: &[Dataset], labels: &[String], y: Axis, style: &PlotStyle) -> Figure {
  let mut figure = Figure::new(ChartKind::Line, Axis::linear(QUERY_SEQUENCE), y);
  for (idx, (dataset, label)) in datasets.iter().zip(labels).enumerate() {
    figure.series.push(Series {
      label: label.clone(),
      points: dataset.points(0, 1),
      style: style.series(ChartKind::Line, idx),
    });
  }
  figure
}

/// Grouped (or stacked) bars: one group per category, one bar per dataset
/// taken from column `y_col`.
fn bar_chart(
  kind: ChartKind,
  datasets: &[Dataset],
  labels: &[String],
  categories: Vec<String>,
  y_col: usize,
  x: Axis,
  y: Axis,
  style: &PlotStyle,
) -> Figure {
  let mut figure = Figure::new(kind, x, y);
  for (idx, (dataset, label)) in datasets.iter().zip(labels).enumerate() {
    let points = (0..categories.len())
      .map(|row| (row as f64, dataset.get(row, y_col)))
      .collect();
    figure.series.push(Series {
      label: label.clone(),
      points,
      style: style.series(kind, idx),
    });
  }
  figure.categories = categories;
  figure
}

fn layout_labels(layouts: &[Layout]) -> Vec<String> {
  layouts.iter().map(|layout| layout.title().to_string()).collect()
}

fn param_labels(values: &[f64]) -> Vec<String> {
  values.iter().map(|value| format_param(*value)).collect()
}

fn execution_time_log2(style: &PlotStyle) -> Axis {
  Axis::log(EXECUTION_TIME, 2.0).with_ticks(style.y_axis_ticks)
}

fn fraction_axis(label: &str) -> Axis {
  Axis::linear(label).with_range(0.1, 1.1)
}

/// Upper bound of a linear axis: round to the configured step for large values,
/// to the next power of ten for small ones.
fn linear_upper_bound(max: f64, style: &PlotStyle) -> f64 {
  if max >= style.y_axis_round {
    get_upper_bound(max, style.y_axis_round)
  } else if max > 0.0 {
    next_power_of_10(max)
  } else {
    1.0
  }
}

pub fn create_projectivity_line_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  line_chart(
    datasets,
    &layout_labels(&sweep.layouts),
    &sweep.projectivity,
    1,
    fraction_axis("Fraction of Attributes Projected"),
    execution_time_log2(style),
    style,
  )
}

pub fn create_selectivity_line_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  line_chart(
    datasets,
    &layout_labels(&sweep.layouts),
    &sweep.selectivity,
    1,
    fraction_axis("Fraction of Tuples Selected"),
    execution_time_log2(style),
    style,
  )
}

/// Only the row and column layouts are compared; the y axis ends at the next
/// power of ten above the slowest point.
pub fn create_operator_line_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  let shown = datasets.len().min(2);
  let mut figure = line_chart(
    &datasets[..shown],
    &layout_labels(&sweep.layouts),
    &sweep.selectivity,
    1,
    fraction_axis("Fraction of Tuples Selected"),
    execution_time_log2(style),
    style,
  );
  let y_limit = figure.max_y();
  if y_limit > 0.0 {
    figure.y = figure.y.with_range(0.0, next_power_of_10(y_limit));
  }
  figure
}

pub fn create_horizontal_line_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  let labels: Vec<String> = sweep
    .tuples_per_tilegroup
    .iter()
    .map(|tuples| tuples.to_string())
    .collect();
  line_chart(
    datasets,
    &labels,
    &sweep.selectivity,
    1,
    fraction_axis("Fraction of Tuples Selected"),
    execution_time_log2(style),
    style,
  )
}

pub fn create_ycsb_bar_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  let mut figure = bar_chart(
    ChartKind::Bar,
    datasets,
    &layout_labels(&sweep.layouts),
    param_labels(&sweep.selectivity),
    1,
    Axis::linear("Fraction of Tuples Selected"),
    Axis::linear(EXECUTION_TIME).with_ticks(style.y_axis_ticks),
    style,
  );
  let upper = linear_upper_bound(figure.max_y(), style);
  figure.y = figure.y.with_range(0.0, upper);
  figure
}

pub fn create_subset_line_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  let labels: Vec<String> = sweep
    .access_num_groups
    .iter()
    .map(|groups| format!("{groups} groups"))
    .collect();
  let mut figure = line_chart(
    datasets,
    &labels,
    &sweep.subset_ratios,
    1,
    fraction_axis("Fraction of Attributes Accessed"),
    Axis::linear(EXECUTION_TIME).with_ticks(style.y_axis_ticks),
    style,
  );
  figure.legend_columns = 2;
  figure
}

/// Execution time over the query sequence, with the workload phase written
/// above the middle of every phase.
pub fn create_adapt_line_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  let mut figure = sequence_chart(
    datasets,
    &layout_labels(&sweep.layouts),
    Axis::linear(EXECUTION_TIME).with_ticks(style.y_axis_ticks),
    style,
  );
  figure.x = figure.x.with_range(0.0, sweep.adapt_queries as f64);

  let phase = sweep.adapt_phase_length.max(1);
  figure.annotations = (0..sweep.adapt_queries / phase)
    .map(|idx| Annotation {
      x: (idx * phase) as f64 + phase as f64 / 2.0,
      text: if idx % 2 == 0 { "Scan" } else { "Insert" }.to_string(),
    })
    .collect();
  figure
}

pub fn create_weight_line_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  let mut figure = sequence_chart(
    datasets,
    &param_labels(&sweep.sample_weights),
    Axis::linear(EXECUTION_TIME).with_ticks(style.y_axis_ticks),
    style,
  );
  figure.x = figure.x.with_range(0.0, sweep.adapt_queries as f64);
  figure.legend_columns = 2;
  figure
}

pub fn create_reorg_line_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  let mut figure = sequence_chart(
    datasets,
    &layout_labels(&sweep.layouts),
    Axis::log(EXECUTION_TIME, 10.0).with_ticks(style.y_axis_ticks),
    style,
  );
  figure.x = figure.x.with_range(0.0, sweep.adapt_queries as f64);
  figure
}

/// Tile groups per type after every query, stacked.
pub fn create_distribution_stacked_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  let labels: Vec<String> = sweep
    .tile_group_types
    .iter()
    .map(|kind| format!("Type {kind}"))
    .collect();
  let categories = datasets
    .first()
    .map(|dataset| param_labels(&dataset.column(0)))
    .unwrap_or_default();
  let mut figure = bar_chart(
    ChartKind::StackedBar,
    datasets,
    &labels,
    categories,
    1,
    Axis::linear(QUERY_SEQUENCE),
    Axis::linear("Tile group count").with_ticks(style.y_axis_ticks),
    style,
  );
  figure.legend_columns = 3;
  figure
}

pub fn create_join_line_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  line_chart(
    datasets,
    &layout_labels(&sweep.layouts),
    &sweep.projectivity,
    1,
    fraction_axis("Fraction of Attributes Projected"),
    execution_time_log2(style),
    style,
  )
}

/// Cache misses are the third column of the caching CSV files.
pub fn create_caching_bar_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  bar_chart(
    ChartKind::Bar,
    datasets,
    &layout_labels(&sweep.layouts),
    param_labels(&sweep.projectivity),
    2,
    Axis::linear("Fraction of Attributes Projected"),
    Axis::log("Cache misses", 10.0).with_ticks(style.y_axis_ticks),
    style,
  )
}

pub fn create_hyrise_bar_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  bar_chart(
    ChartKind::Bar,
    datasets,
    &layout_labels(&sweep.layouts),
    param_labels(&sweep.selectivity),
    1,
    Axis::linear("Fraction of Tuples Selected"),
    execution_time_log2(style),
    style,
  )
}

pub fn create_concurrency_line_chart(datasets: &[Dataset], sweep: &Sweep, style: &PlotStyle) -> Figure {
  let threads: Vec<f64> = sweep.thread_counts.iter().map(|t| *t as f64).collect();
  let mut figure = line_chart(
    datasets,
    &layout_labels(&sweep.layouts),
    &threads,
    1,
    Axis::linear("Number of threads"),
    Axis::linear("Throughput (txn/s)").with_ticks(style.y_axis_ticks),
    style,
  );
  let upper = linear_upper_bound(figure.max_y(), style);
  figure.y = figure.y.with_range(0.0, upper);
  figure
}

/// A figure holding only legend entries, styled like line series.
pub fn create_legend(labels: &[String], style: &PlotStyle) -> Figure {
  let mut figure = Figure::new(ChartKind::Legend, Axis::linear(""), Axis::linear(""));
  figure.series = labels
    .iter()
    .enumerate()
    .map(|(idx, label)| Series {
      label: label.clone(),
      points: Vec::new(),
      style: style.series(ChartKind::Legend, idx),
    })
    .collect();
  figure.legend_columns = labels.len().clamp(1, 4);
  figure
}

///////////////////////////////////////////////////////////////////////////////
// Drivers
///////////////////////////////////////////////////////////////////////////////

type Builder = fn(&[Dataset], &Sweep, &PlotStyle) -> Figure;

/// Shared walk of the projectivity and selectivity grids: one chart per
/// (column count, write ratio, operator).
fn operator_grid_plot(
  ctx: &PlotContext<'_>,
  sink: &mut dyn FigureSink,
  category: Category,
  n_rows: usize,
  build: Builder,
) -> Result<Vec<PathBuf>> {
  let sweep = &ctx.config.sweep;
  let mut outputs = Vec::new();
  for (cc_idx, column_count) in sweep.column_counts.iter().enumerate() {
    for write_ratio in &sweep.write_ratios {
      for operator in &sweep.operators {
        let datasets = ctx.load_layouts(
          category,
          &[
            operator.name(),
            &column_count.to_string(),
            &format_param(*write_ratio),
          ],
          n_rows,
          2,
        )?;
        let figure = build(&datasets, sweep, ctx.style);
        let name = format!(
          "{category}-{}-{}-{}",
          operator.name(),
          table_type(cc_idx),
          write_mix(*write_ratio)
        );
        outputs.push(sink.save(&figure, &name, ctx.style.short_size())?);
      }
    }
  }
  Ok(outputs)
}

fn projectivity_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  let n_rows = ctx.config.sweep.projectivity.len();
  operator_grid_plot(ctx, sink, Category::Projectivity, n_rows, create_projectivity_line_chart)
}

fn selectivity_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  let n_rows = ctx.config.sweep.selectivity.len();
  operator_grid_plot(ctx, sink, Category::Selectivity, n_rows, create_selectivity_line_chart)
}

fn operator_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  let sweep = &ctx.config.sweep;
  let mut outputs = Vec::new();
  for (cc_idx, column_count) in sweep.column_counts.iter().enumerate() {
    for write_ratio in &sweep.write_ratios {
      for (p_idx, projectivity) in sweep.op_projectivity.iter().enumerate() {
        let datasets = ctx.load_layouts(
          Category::Operator,
          &[
            &format_param(*projectivity),
            &column_count.to_string(),
            &format_param(*write_ratio),
          ],
          sweep.selectivity.len(),
          2,
        )?;
        let figure = create_operator_line_chart(&datasets, sweep, ctx.style);
        let name = format!(
          "operator-{}-{}-{}",
          p_idx + 1,
          table_type(cc_idx),
          write_mix(*write_ratio)
        );
        outputs.push(sink.save(&figure, &name, ctx.style.short_size())?);
      }
    }
  }
  Ok(outputs)
}

fn horizontal_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  let sweep = &ctx.config.sweep;
  let mut outputs = Vec::new();
  for layout in &sweep.layouts {
    let datasets = sweep
      .tuples_per_tilegroup
      .iter()
      .map(|tuples| {
        ctx.load(
          Category::Horizontal,
          &[layout.name(), &tuples.to_string()],
          sweep.selectivity.len(),
          2,
        )
      })
      .collect::<Result<Vec<_>>>()?;
    let figure = create_horizontal_line_chart(&datasets, sweep, ctx.style);
    let name = format!("horizontal-{}", layout.name());
    outputs.push(sink.save(&figure, &name, ctx.style.short_size())?);
  }
  Ok(outputs)
}

fn ycsb_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  let sweep = &ctx.config.sweep;
  let mut outputs = Vec::new();
  for operator in &sweep.operators {
    for write_ratio in &sweep.write_ratios {
      let datasets = ctx.load_layouts(
        Category::Ycsb,
        &[operator.name(), &format_param(*write_ratio)],
        sweep.selectivity.len(),
        2,
      )?;
      let figure = create_ycsb_bar_chart(&datasets, sweep, ctx.style);
      let name = format!("ycsb-{}-{}", operator.name(), write_mix(*write_ratio));
      outputs.push(sink.save(&figure, &name, ctx.style.short_size())?);
    }
  }
  Ok(outputs)
}

fn subset_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  let sweep = &ctx.config.sweep;
  let mut outputs = Vec::new();
  for subset_type in &sweep.subset_types {
    let datasets = sweep
      .access_num_groups
      .iter()
      .map(|groups| {
        ctx.load(
          Category::Subset,
          &[&subset_type.to_string(), &groups.to_string()],
          sweep.subset_ratios.len(),
          2,
        )
      })
      .collect::<Result<Vec<_>>>()?;
    let figure = create_subset_line_chart(&datasets, sweep, ctx.style);
    let name = format!("subset-{subset_type}");
    outputs.push(sink.save(&figure, &name, ctx.style.short_size())?);
  }
  Ok(outputs)
}

fn adapt_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  let sweep = &ctx.config.sweep;
  let datasets = ctx.load_layouts(Category::Adapt, &[], sweep.adapt_queries, 2)?;
  let figure = create_adapt_line_chart(&datasets, sweep, ctx.style);
  Ok(vec![sink.save(&figure, "adapt", ctx.style.full_size())?])
}

fn weight_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  let sweep = &ctx.config.sweep;
  let datasets = sweep
    .sample_weights
    .iter()
    .map(|weight| ctx.load(Category::Weight, &[&format_param(*weight)], sweep.adapt_queries, 2))
    .collect::<Result<Vec<_>>>()?;
  let figure = create_weight_line_chart(&datasets, sweep, ctx.style);
  Ok(vec![sink.save(&figure, "weight", ctx.style.short_size())?])
}

fn reorg_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  let sweep = &ctx.config.sweep;
  let mut outputs = Vec::new();
  for write_ratio in &sweep.write_ratios {
    let datasets = ctx.load_layouts(
      Category::Reorg,
      &[&format_param(*write_ratio)],
      sweep.adapt_queries,
      2,
    )?;
    let figure = create_reorg_line_chart(&datasets, sweep, ctx.style);
    let name = format!("reorg-{}", write_mix(*write_ratio));
    outputs.push(sink.save(&figure, &name, ctx.style.short_size())?);
  }
  Ok(outputs)
}

fn distribution_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  let sweep = &ctx.config.sweep;
  let datasets = sweep
    .tile_group_types
    .iter()
    .map(|kind| {
      ctx.load(
        Category::Distribution,
        &[&kind.to_string()],
        sweep.distribution_queries,
        2,
      )
    })
    .collect::<Result<Vec<_>>>()?;
  let figure = create_distribution_stacked_chart(&datasets, sweep, ctx.style);
  Ok(vec![sink.save(&figure, "distribution", ctx.style.full_size())?])
}

/// Shared walk of the join and caching grids: one chart per
/// (column count, write ratio).
fn table_grid_plot(
  ctx: &PlotContext<'_>,
  sink: &mut dyn FigureSink,
  category: Category,
  n_cols: usize,
  build: Builder,
) -> Result<Vec<PathBuf>> {
  let sweep = &ctx.config.sweep;
  let mut outputs = Vec::new();
  for (cc_idx, column_count) in sweep.column_counts.iter().enumerate() {
    for write_ratio in &sweep.write_ratios {
      let datasets = ctx.load_layouts(
        category,
        &[&column_count.to_string(), &format_param(*write_ratio)],
        sweep.projectivity.len(),
        n_cols,
      )?;
      let figure = build(&datasets, sweep, ctx.style);
      let name = format!(
        "{category}-{}-{}",
        table_type(cc_idx),
        write_mix(*write_ratio)
      );
      outputs.push(sink.save(&figure, &name, ctx.style.short_size())?);
    }
  }
  Ok(outputs)
}

fn join_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  table_grid_plot(ctx, sink, Category::Join, 2, create_join_line_chart)
}

fn caching_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  table_grid_plot(ctx, sink, Category::Caching, 3, create_caching_bar_chart)
}

fn hyrise_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  let sweep = &ctx.config.sweep;
  let mut outputs = Vec::new();
  for (p_idx, projectivity) in sweep.op_projectivity.iter().enumerate() {
    let datasets = ctx.load_layouts(
      Category::Hyrise,
      &[&format_param(*projectivity)],
      sweep.selectivity.len(),
      2,
    )?;
    let figure = create_hyrise_bar_chart(&datasets, sweep, ctx.style);
    let name = format!("hyrise-{}", p_idx + 1);
    outputs.push(sink.save(&figure, &name, ctx.style.short_size())?);
  }
  Ok(outputs)
}

fn concurrency_plot(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  let sweep = &ctx.config.sweep;
  let mut outputs = Vec::new();
  for (t_idx, theta) in sweep.thetas.iter().enumerate() {
    let datasets = ctx.load_layouts(
      Category::Concurrency,
      &[&format_param(*theta)],
      sweep.thread_counts.len(),
      2,
    )?;
    let figure = create_concurrency_line_chart(&datasets, sweep, ctx.style);
    let skew = if t_idx == 0 { "low" } else { "high" };
    outputs.push(sink.save(&figure, &format!("concurrency-{skew}"), ctx.style.short_size())?);
  }
  Ok(outputs)
}

/// Standalone legends shared by the charts that do not draw their own.
pub fn plot_legends(ctx: &PlotContext<'_>, sink: &mut dyn FigureSink) -> Result<Vec<PathBuf>> {
  let sweep = &ctx.config.sweep;
  let size = (ctx.style.graph_width * 3 / 2, 50);

  let layouts = create_legend(&layout_labels(&sweep.layouts), ctx.style);
  let tilegroups: Vec<String> = sweep
    .tuples_per_tilegroup
    .iter()
    .map(|tuples| tuples.to_string())
    .collect();
  let tilegroups = create_legend(&tilegroups, ctx.style);

  Ok(vec![
    sink.save(&layouts, "legend", size)?,
    sink.save(&tilegroups, "legend-tilegroup", size)?,
  ])
}
