//! This crate implements the plotting side of the tile-group layout harness:
//! - Loading of the CSV result tree written by the collector
//! - Per-category chart construction as plain [`figure::Figure`] values
//! - SVG rendering of those figures with plotters
//! - The `tilegroup-eval` binary driving experiments and plots end to end

pub mod charts;
pub mod error;
pub mod figure;
pub mod render;
pub mod style;
pub mod util;

pub use charts::{plot, plot_legends, PlotContext};
pub use error::PlotError;
pub use figure::Figure;
pub use render::{FigureSink, SvgSink};
pub use style::PlotStyle;
pub use util::{load_dataset, Dataset, RowPolicy};
