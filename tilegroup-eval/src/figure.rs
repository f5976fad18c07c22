//! A backend independent description of one chart. Chart constructors build a
//! [`Figure`]; a [`crate::render::FigureSink`] turns it into a file.

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
  Circle,
  Square,
  Triangle,
  Cross,
  None,
}

/// Fill pattern of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hatch {
  Solid,
  Vertical,
  Horizontal,
  Dots,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
  Linear,
  Log { base: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
  Line,
  /// Bars grouped per category, one bar per series
  Bar,
  /// Bars stacked per category, one segment per series
  StackedBar,
  /// Only the legend of the series, no axes
  Legend,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
  pub color: Rgb,
  pub marker: Marker,
  pub hatch: Hatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
  pub label: String,
  /// `(x, y)`; for bar charts `x` is the category index
  pub points: Vec<(f64, f64)>,
  pub style: SeriesStyle,
}

impl Series {
  pub fn max_y(&self) -> f64 {
    self.points.iter().map(|(_, y)| *y).fold(0.0, f64::max)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
  pub label: String,
  /// Fixed bounds; derived from the data when absent
  pub range: Option<(f64, f64)>,
  pub scale: Scale,
  /// Maximum number of major ticks
  pub ticks: usize,
}

impl Axis {
  pub fn linear(label: impl Into<String>) -> Self {
    Axis {
      label: label.into(),
      range: None,
      scale: Scale::Linear,
      ticks: 5,
    }
  }

  pub fn log(label: impl Into<String>, base: f64) -> Self {
    Axis {
      scale: Scale::Log { base },
      ..Axis::linear(label)
    }
  }

  pub fn with_range(mut self, min: f64, max: f64) -> Self {
    self.range = Some((min, max));
    self
  }

  pub fn with_ticks(mut self, ticks: usize) -> Self {
    self.ticks = ticks;
    self
  }
}

/// Static text placed above the plot at a data x position.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
  pub x: f64,
  pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
  pub kind: ChartKind,
  pub x: Axis,
  pub y: Axis,
  /// Category labels of bar charts, indexed by the series' x values
  pub categories: Vec<String>,
  pub series: Vec<Series>,
  pub annotations: Vec<Annotation>,
  /// Columns of the legend; 0 hides it
  pub legend_columns: usize,
}

impl Figure {
  pub fn new(kind: ChartKind, x: Axis, y: Axis) -> Self {
    Figure {
      kind,
      x,
      y,
      categories: Vec::new(),
      series: Vec::new(),
      annotations: Vec::new(),
      legend_columns: 0,
    }
  }

  pub fn max_y(&self) -> f64 {
    match self.kind {
      ChartKind::StackedBar => self
        .categories
        .iter()
        .enumerate()
        .map(|(idx, _)| {
          self
            .series
            .iter()
            .filter_map(|s| s.points.iter().find(|(x, _)| *x as usize == idx))
            .map(|(_, y)| *y)
            .sum::<f64>()
        })
        .fold(0.0, f64::max),
      _ => self.series.iter().map(Series::max_y).fold(0.0, f64::max),
    }
  }
}
