use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tilegroup_core::{eval, Category, Config};
use tilegroup_eval::{plot, plot_legends, PlotContext, PlotStyle, RowPolicy, SvgSink};

/// Runs tile-group layout experiments and plots their results.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
  #[clap(long, short = 'p', help = "Run the projectivity experiment")]
  projectivity: bool,
  #[clap(long, short = 's', help = "Run the selectivity experiment")]
  selectivity: bool,
  #[clap(long, short = 'o', help = "Run the operator experiment")]
  operator: bool,
  #[clap(long)]
  horizontal: bool,
  #[clap(long)]
  ycsb: bool,
  #[clap(long)]
  subset: bool,
  #[clap(long)]
  adapt: bool,
  #[clap(long)]
  weight: bool,
  #[clap(long)]
  reorg: bool,
  #[clap(long)]
  distribution: bool,
  #[clap(long)]
  join: bool,
  #[clap(long, help = "Run the caching experiment under the profiler")]
  caching: bool,
  #[clap(long)]
  hyrise: bool,
  #[clap(long)]
  concurrency: bool,

  #[clap(long, short = 'a', help = "Plot the projectivity results")]
  projectivity_plot: bool,
  #[clap(long, short = 'b', help = "Plot the selectivity results")]
  selectivity_plot: bool,
  #[clap(long, short = 'c', help = "Plot the operator results")]
  operator_plot: bool,
  #[clap(long)]
  horizontal_plot: bool,
  #[clap(long)]
  ycsb_plot: bool,
  #[clap(long)]
  subset_plot: bool,
  #[clap(long)]
  adapt_plot: bool,
  #[clap(long)]
  weight_plot: bool,
  #[clap(long)]
  reorg_plot: bool,
  #[clap(long)]
  distribution_plot: bool,
  #[clap(long)]
  join_plot: bool,
  #[clap(long)]
  caching_plot: bool,
  #[clap(long)]
  hyrise_plot: bool,
  #[clap(long)]
  concurrency_plot: bool,
  #[clap(long, help = "Plot the standalone legends")]
  legend: bool,

  #[clap(long, default_value = "../peloton/build", help = "Benchmark build directory")]
  build_dir: PathBuf,
  #[clap(long, default_value = "results", help = "Root of the CSV result tree")]
  results_dir: PathBuf,
  #[clap(long, default_value = "images", help = "Directory charts are written to")]
  output_dir: PathBuf,
  #[clap(long, help = "Summary file written by the benchmark")]
  summary_file: Option<PathBuf>,
  #[clap(long)]
  scale_factor: Option<f64>,
  #[clap(long)]
  transactions: Option<u32>,
  #[clap(long, help = "Profiler used for the caching experiment")]
  profiler: Option<PathBuf>,
  #[clap(long, help = "Tolerate result files with an unexpected number of rows")]
  lenient: bool,
}

impl Args {
  /// Whether to (run, plot) `category`.
  fn selection(&self, category: Category) -> (bool, bool) {
    match category {
      Category::Projectivity => (self.projectivity, self.projectivity_plot),
      Category::Selectivity => (self.selectivity, self.selectivity_plot),
      Category::Operator => (self.operator, self.operator_plot),
      Category::Horizontal => (self.horizontal, self.horizontal_plot),
      Category::Ycsb => (self.ycsb, self.ycsb_plot),
      Category::Subset => (self.subset, self.subset_plot),
      Category::Adapt => (self.adapt, self.adapt_plot),
      Category::Weight => (self.weight, self.weight_plot),
      Category::Reorg => (self.reorg, self.reorg_plot),
      Category::Distribution => (self.distribution, self.distribution_plot),
      Category::Join => (self.join, self.join_plot),
      Category::Caching => (self.caching, self.caching_plot),
      Category::Hyrise => (self.hyrise, self.hyrise_plot),
      Category::Concurrency => (self.concurrency, self.concurrency_plot),
    }
  }

  fn config(&self) -> Config {
    let mut config = Config::new(&self.build_dir, self.results_dir.clone());
    if let Some(summary_file) = &self.summary_file {
      config = config.with_summary_file(summary_file.clone());
    }
    if let Some(scale_factor) = self.scale_factor {
      config = config.with_scale_factor(scale_factor);
    }
    if let Some(transactions) = self.transactions {
      config = config.with_transaction_count(transactions);
    }
    if let Some(profiler) = &self.profiler {
      config = config.with_profiler(profiler.clone());
    }
    config
  }
}

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
  let args = Args::parse();

  let config = args.config();
  let style = PlotStyle::default();
  let policy = if args.lenient {
    RowPolicy::Lenient
  } else {
    RowPolicy::Strict
  };
  let ctx = PlotContext::new(&config, &style, policy);
  let mut sink = SvgSink::new(&args.output_dir, style.clone());

  for category in Category::ALL {
    let (run, draw) = args.selection(category);
    if run {
      let report = eval(&config, category)?;
      info!(
        "{category}: collected {} rows into {} files",
        report.rows,
        report.files.len()
      );
    }
    if draw {
      plot(category, &ctx, &mut sink).with_context(|| format!("failed to plot {category}"))?;
    }
  }

  if args.legend {
    plot_legends(&ctx, &mut sink).context("failed to plot legends")?;
  }
  Ok(())
}
