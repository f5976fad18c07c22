use crate::figure::{ChartKind, Hatch, Marker, Rgb, SeriesStyle};

/// Palettes, sizes and fonts shared by every chart.
#[derive(Debug, Clone)]
pub struct PlotStyle {
  pub line_colors: Vec<Rgb>,
  pub bar_colors: Vec<Rgb>,
  pub stack_colors: Vec<Rgb>,
  pub markers: Vec<Marker>,
  pub hatches: Vec<Hatch>,
  pub grid_color: Rgb,
  pub font_family: String,
  pub label_font_size: u32,
  pub tick_font_size: u32,
  pub line_width: u32,
  pub marker_size: u32,
  pub graph_width: u32,
  pub graph_height: u32,
  /// Linear y axes are rounded up to a multiple of this
  pub y_axis_round: f64,
  pub y_axis_ticks: usize,
  /// File extension of saved charts
  pub extension: String,
}

impl Default for PlotStyle {
  fn default() -> Self {
    PlotStyle {
      line_colors: vec![
        Rgb(0xfd, 0xc0, 0x86),
        Rgb(0xb3, 0xe2, 0xcd),
        Rgb(0xfc, 0x8d, 0x62),
        Rgb(0xa6, 0xce, 0xe3),
        Rgb(0xe4, 0x1a, 0x1c),
      ],
      bar_colors: vec![
        Rgb(0xf5, 0x8a, 0x87),
        Rgb(0x80, 0xca, 0x86),
        Rgb(0x9e, 0xc9, 0xe9),
        Rgb(0xf1, 0x58, 0x54),
        Rgb(0x66, 0xa2, 0x6b),
        Rgb(0x5d, 0xa5, 0xda),
      ],
      stack_colors: vec![
        Rgb(0xaf, 0xaf, 0xaf),
        Rgb(0xf1, 0x58, 0x54),
        Rgb(0x5d, 0xa5, 0xda),
        Rgb(0x60, 0xbd, 0x68),
        Rgb(0xb2, 0x76, 0xb2),
        Rgb(0xde, 0xcf, 0x3f),
        Rgb(0xf1, 0x7c, 0xb0),
        Rgb(0xb2, 0x91, 0x2f),
        Rgb(0xfa, 0xa4, 0x3a),
      ],
      markers: vec![
        Marker::Circle,
        Marker::Square,
        Marker::Triangle,
        Marker::Cross,
        Marker::Circle,
        Marker::Triangle,
      ],
      hatches: vec![Hatch::Vertical, Hatch::Solid, Hatch::Dots, Hatch::Horizontal],
      grid_color: Rgb(0x80, 0x80, 0x80),
      font_family: "sans-serif".to_string(),
      label_font_size: 16,
      tick_font_size: 14,
      line_width: 3,
      marker_size: 5,
      graph_width: 400,
      graph_height: 300,
      y_axis_round: 1000.0,
      y_axis_ticks: 5,
      extension: "svg".to_string(),
    }
  }
}

impl PlotStyle {
  /// Style of the `idx`-th series of a chart; palettes cycle. An empty
  /// palette falls back to black, no marker and solid fill.
  pub fn series(&self, kind: ChartKind, idx: usize) -> SeriesStyle {
    let colors = match kind {
      ChartKind::Line | ChartKind::Legend => &self.line_colors,
      ChartKind::Bar => &self.bar_colors,
      ChartKind::StackedBar => &self.stack_colors,
    };
    let hatch = match kind {
      ChartKind::Bar => cycle(&self.hatches, idx).unwrap_or(Hatch::Solid),
      _ => Hatch::Solid,
    };
    let marker = match kind {
      ChartKind::Line | ChartKind::Legend => cycle(&self.markers, idx).unwrap_or(Marker::None),
      _ => Marker::None,
    };
    SeriesStyle {
      color: cycle(colors, idx).unwrap_or(Rgb(0, 0, 0)),
      marker,
      hatch,
    }
  }

  /// Size of the standard short line/bar chart.
  pub fn short_size(&self) -> (u32, u32) {
    (self.graph_width, self.graph_height / 2)
  }

  pub fn full_size(&self) -> (u32, u32) {
    (self.graph_width, self.graph_height)
  }
}

fn cycle<T: Copy>(items: &[T], idx: usize) -> Option<T> {
  items.get(idx.checked_rem(items.len())?).copied()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_palettes_cycle() {
    let style = PlotStyle::default();
    assert_eq!(style.series(ChartKind::Bar, 0), style.series(ChartKind::Bar, 12));
    assert_eq!(Marker::Square, style.series(ChartKind::Line, 7).marker);
    assert_eq!(Hatch::Solid, style.series(ChartKind::StackedBar, 1).hatch);
  }

  #[test]
  fn test_empty_palettes_fall_back() {
    let style = PlotStyle {
      line_colors: Vec::new(),
      bar_colors: Vec::new(),
      markers: Vec::new(),
      hatches: Vec::new(),
      ..PlotStyle::default()
    };
    let line = style.series(ChartKind::Line, 3);
    assert_eq!(Rgb(0, 0, 0), line.color);
    assert_eq!(Marker::None, line.marker);
    assert_eq!(Hatch::Solid, style.series(ChartKind::Bar, 2).hatch);
  }
}
