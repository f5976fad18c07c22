//! Rendering of [`Figure`]s with plotters.
//!
//! Log axes are drawn on a linear coordinate holding `log_base(y)`, with tick
//! labels mapped back to data values. This gives base 2 and base 10 axes the
//! same code path.

use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::info;
use plotters::{
  coord::{cartesian::Cartesian2d, types::RangedCoordf64, Shift},
  prelude::*,
};

use crate::{
  figure::{ChartKind, Figure, Hatch, Marker, Rgb, Scale},
  style::PlotStyle,
};

/// Where finished figures go.
pub trait FigureSink {
  /// Persist `figure` under `name` (no extension) at `size` pixels and return
  /// the written path.
  fn save(&mut self, figure: &Figure, name: &str, size: (u32, u32)) -> Result<PathBuf>;
}

/// Writes every figure as an SVG file into one directory.
#[derive(Debug, Clone)]
pub struct SvgSink {
  output_dir: PathBuf,
  style: PlotStyle,
}

impl SvgSink {
  pub fn new(output_dir: impl Into<PathBuf>, style: PlotStyle) -> Self {
    SvgSink {
      output_dir: output_dir.into(),
      style,
    }
  }
}

impl FigureSink for SvgSink {
  fn save(&mut self, figure: &Figure, name: &str, size: (u32, u32)) -> Result<PathBuf> {
    fs::create_dir_all(&self.output_dir).with_context(|| {
      format!(
        "failed to create output directory {}",
        self.output_dir.display()
      )
    })?;
    let path = self
      .output_dir
      .join(format!("{name}.{}", self.style.extension));
    draw_svg(figure, &path, size, &self.style)
      .with_context(|| format!("failed to render {}", path.display()))?;
    info!("OUTPUT: {}", path.display());
    Ok(path)
  }
}

type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn draw_svg(figure: &Figure, path: &Path, size: (u32, u32), style: &PlotStyle) -> Result<()> {
  let root = SVGBackend::new(path, size).into_drawing_area();
  root.fill(&WHITE)?;
  match figure.kind {
    ChartKind::Legend => draw_legend(&root, figure, style)?,
    _ => draw_chart(&root, figure, style)?,
  }
  root.present()?;
  Ok(())
}

fn rgb(color: Rgb) -> RGBColor {
  RGBColor(color.0, color.1, color.2)
}

/// Maps data values onto the chart's linear y coordinate.
#[derive(Debug, Clone, Copy)]
struct YMap(Scale);

impl YMap {
  fn to_chart(self, y: f64) -> Option<f64> {
    match self.0 {
      Scale::Linear => Some(y),
      Scale::Log { base } if y > 0.0 => Some(y.log(base)),
      Scale::Log { .. } => None,
    }
  }

  fn label(self, v: f64) -> String {
    match self.0 {
      Scale::Linear => format_tick(v),
      Scale::Log { base } => format_tick(base.powf(v)),
    }
  }
}

fn format_tick(v: f64) -> String {
  if (v - v.round()).abs() < 1e-6 {
    format!("{:.0}", v)
  } else if v.abs() >= 10.0 {
    format!("{:.1}", v)
  } else {
    let text = format!("{:.2}", v);
    text.trim_end_matches('0').to_string()
  }
}

fn category_label(categories: &[String], x: f64) -> String {
  let idx = x.round();
  if idx < 0.0 || (x - idx).abs() > 0.3 {
    return String::new();
  }
  categories.get(idx as usize).cloned().unwrap_or_default()
}

fn x_bounds(figure: &Figure) -> (f64, f64) {
  if let Some(range) = figure.x.range {
    return range;
  }
  if matches!(figure.kind, ChartKind::Bar | ChartKind::StackedBar) {
    return (-0.5, figure.categories.len() as f64 - 0.5);
  }
  let xs = figure.series.iter().flat_map(|s| s.points.iter().map(|(x, _)| *x));
  let (lo, hi) = xs.fold((f64::MAX, f64::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
  if lo > hi {
    return (0.0, 1.0);
  }
  let pad = ((hi - lo) * 0.05).max(0.5);
  (lo - pad, hi + pad)
}

fn y_bounds(figure: &Figure, ymap: YMap) -> (f64, f64) {
  let max = figure.max_y();
  match figure.y.scale {
    Scale::Linear => match figure.y.range {
      Some(range) => range,
      None if max > 0.0 => (0.0, max * 1.1),
      None => (0.0, 1.0),
    },
    Scale::Log { base } => {
      let min = figure
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, y)| *y))
        .filter(|y| *y > 0.0)
        .fold(f64::MAX, f64::min);
      let data_lo = if min == f64::MAX { 0.0 } else { min.log(base).floor() };
      let data_hi = if max > 0.0 { max.log(base).ceil() } else { 1.0 };
      let (lo, hi) = match figure.y.range {
        Some((lo, hi)) => (
          ymap.to_chart(lo).unwrap_or(data_lo),
          ymap.to_chart(hi).unwrap_or(data_hi),
        ),
        None => (data_lo, data_hi),
      };
      if hi > lo {
        (lo, hi)
      } else {
        (lo, lo + 1.0)
      }
    }
  }
}

fn draw_chart(root: &DrawingArea<SVGBackend<'_>, Shift>, figure: &Figure, style: &PlotStyle) -> Result<()> {
  let ymap = YMap(figure.y.scale);
  let (x_lo, x_hi) = x_bounds(figure);
  let (y_lo, y_hi) = y_bounds(figure, ymap);
  let family = style.font_family.as_str();

  let mut chart = ChartBuilder::on(root)
    .margin(5)
    .margin_top(if figure.annotations.is_empty() { 5 } else { 20 })
    .x_label_area_size(40)
    .y_label_area_size(55)
    .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

  let categories = &figure.categories;
  let x_labels = if categories.is_empty() {
    figure.x.ticks
  } else {
    categories.len()
  };
  chart
    .configure_mesh()
    .disable_x_mesh()
    .bold_line_style(rgb(style.grid_color).mix(0.4))
    .light_line_style(WHITE)
    .x_labels(x_labels)
    .y_labels(figure.y.ticks)
    .x_label_formatter(&|x| {
      if categories.is_empty() {
        format_tick(*x)
      } else {
        category_label(categories, *x)
      }
    })
    .y_label_formatter(&|y| ymap.label(*y))
    .x_desc(figure.x.label.as_str())
    .y_desc(figure.y.label.as_str())
    .label_style((family, style.tick_font_size))
    .axis_desc_style((family, style.label_font_size))
    .draw()?;

  match figure.kind {
    ChartKind::Line => draw_lines(&mut chart, figure, style, ymap)?,
    ChartKind::Bar => draw_bars(&mut chart, figure, ymap, y_lo)?,
    ChartKind::StackedBar => draw_stacked(&mut chart, figure, ymap, y_lo)?,
    ChartKind::Legend => {}
  }

  for annotation in &figure.annotations {
    chart.draw_series(std::iter::once(Text::new(
      annotation.text.clone(),
      (annotation.x, y_hi),
      (family, style.tick_font_size),
    )))?;
  }

  if figure.legend_columns > 0 {
    chart
      .configure_series_labels()
      .position(SeriesLabelPosition::UpperLeft)
      .background_style(WHITE.mix(0.8))
      .border_style(BLACK)
      .label_font((family, style.tick_font_size))
      .draw()?;
  }

  Ok(())
}

fn draw_lines(chart: &mut Chart<'_, '_>, figure: &Figure, style: &PlotStyle, ymap: YMap) -> Result<()> {
  let width = style.line_width;
  for series in &figure.series {
    let color = rgb(series.style.color);
    let points: Vec<(f64, f64)> = series
      .points
      .iter()
      .filter_map(|(x, y)| ymap.to_chart(*y).map(|y| (*x, y)))
      .collect();

    chart
      .draw_series(LineSeries::new(points.clone(), color.stroke_width(width)))?
      .label(series.label.as_str())
      .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width)));
    draw_markers(chart, &points, series.style.marker, color, style.marker_size)?;
  }
  Ok(())
}

fn draw_markers(
  chart: &mut Chart<'_, '_>,
  points: &[(f64, f64)],
  marker: Marker,
  color: RGBColor,
  size: u32,
) -> Result<()> {
  let half = size as i32;
  match marker {
    Marker::Circle => {
      chart.draw_series(points.iter().map(|p| Circle::new(*p, size, color.filled())))?;
    }
    Marker::Square => {
      chart.draw_series(
        points
          .iter()
          .map(|p| EmptyElement::at(*p) + Rectangle::new([(-half, -half), (half, half)], color.filled())),
      )?;
    }
    Marker::Triangle => {
      chart.draw_series(points.iter().map(|p| TriangleMarker::new(*p, size, color.filled())))?;
    }
    Marker::Cross => {
      chart.draw_series(
        points
          .iter()
          .map(|p| Cross::new(*p, size, color.stroke_width(2))),
      )?;
    }
    Marker::None => {}
  }
  Ok(())
}

fn draw_bars(chart: &mut Chart<'_, '_>, figure: &Figure, ymap: YMap, y_lo: f64) -> Result<()> {
  let group_width = 0.8;
  let bar_width = group_width / figure.series.len().max(1) as f64;

  for (idx, series) in figure.series.iter().enumerate() {
    let color = rgb(series.style.color);
    for (x, y) in &series.points {
      let Some(top) = ymap.to_chart(*y) else {
        continue;
      };
      let left = x - group_width / 2.0 + idx as f64 * bar_width;
      draw_bar(chart, (left, y_lo), (left + bar_width, top), color, series.style.hatch)?;
    }
    add_legend_entry(chart, &series.label, color)?;
  }
  Ok(())
}

fn draw_stacked(chart: &mut Chart<'_, '_>, figure: &Figure, ymap: YMap, y_lo: f64) -> Result<()> {
  let mut bottoms = vec![0.0; figure.categories.len()];
  for series in &figure.series {
    let color = rgb(series.style.color);
    for (x, y) in &series.points {
      let Some(bottom) = bottoms.get_mut(x.round() as usize) else {
        continue;
      };
      let lo = ymap.to_chart(*bottom).unwrap_or(y_lo);
      *bottom += y;
      let hi = ymap.to_chart(*bottom).unwrap_or(y_lo);
      draw_bar(chart, (x - 0.4, lo), (x + 0.4, hi), color, series.style.hatch)?;
    }
    add_legend_entry(chart, &series.label, color)?;
  }
  Ok(())
}

fn draw_bar(
  chart: &mut Chart<'_, '_>,
  (x0, y0): (f64, f64),
  (x1, y1): (f64, f64),
  color: RGBColor,
  hatch: Hatch,
) -> Result<()> {
  if hatch == Hatch::Solid {
    chart.draw_series(std::iter::once(Rectangle::new([(x0, y0), (x1, y1)], color.filled())))?;
    return Ok(());
  }

  chart.draw_series(std::iter::once(Rectangle::new(
    [(x0, y0), (x1, y1)],
    color.mix(0.25).filled(),
  )))?;
  chart.draw_series(std::iter::once(Rectangle::new(
    [(x0, y0), (x1, y1)],
    color.stroke_width(1),
  )))?;

  match hatch {
    Hatch::Vertical => {
      chart.draw_series((1..4).map(|i| {
        let x = x0 + (x1 - x0) * i as f64 / 4.0;
        PathElement::new(vec![(x, y0), (x, y1)], color.stroke_width(1))
      }))?;
    }
    Hatch::Horizontal => {
      chart.draw_series((1..6).map(|i| {
        let y = y0 + (y1 - y0) * i as f64 / 6.0;
        PathElement::new(vec![(x0, y), (x1, y)], color.stroke_width(1))
      }))?;
    }
    Hatch::Dots => {
      let dots = (1..3).flat_map(|i| (1..5).map(move |j| (i, j)));
      chart.draw_series(dots.map(|(i, j)| {
        let x = x0 + (x1 - x0) * i as f64 / 3.0;
        let y = y0 + (y1 - y0) * j as f64 / 5.0;
        Circle::new((x, y), 1, color.filled())
      }))?;
    }
    Hatch::Solid => {}
  }
  Ok(())
}

fn add_legend_entry(chart: &mut Chart<'_, '_>, label: &str, color: RGBColor) -> Result<()> {
  chart
    .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
    .label(label)
    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
  Ok(())
}

/// A legend-only figure: one entry per series laid out in `legend_columns`
/// columns.
fn draw_legend(root: &DrawingArea<SVGBackend<'_>, Shift>, figure: &Figure, style: &PlotStyle) -> Result<()> {
  let (width, _) = root.dim_in_pixel();
  let columns = figure.legend_columns.max(1);
  let cell = width as i32 / columns as i32;
  let size = style.marker_size;

  for (idx, series) in figure.series.iter().enumerate() {
    let x = (idx % columns) as i32 * cell + 10;
    let y = (idx / columns) as i32 * 30 + 20;
    let color = rgb(series.style.color);

    root.draw(&PathElement::new(
      vec![(x, y), (x + 35, y)],
      color.stroke_width(style.line_width),
    ))?;
    let center = (x + 17, y);
    match series.style.marker {
      Marker::Circle => root.draw(&Circle::new(center, size, color.filled()))?,
      Marker::Square => {
        let half = size as i32;
        root.draw(&Rectangle::new(
          [(center.0 - half, y - half), (center.0 + half, y + half)],
          color.filled(),
        ))?
      }
      Marker::Triangle => root.draw(&TriangleMarker::new(center, size, color.filled()))?,
      Marker::Cross => root.draw(&Cross::new(center, size, color.stroke_width(2)))?,
      Marker::None => {}
    }
    root.draw(&Text::new(
      series.label.as_str(),
      (x + 45, y - 8),
      (style.font_family.as_str(), style.label_font_size),
    ))?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use rstest::rstest;

  use super::*;
  use crate::figure::Axis;

  #[rstest]
  #[case(4.0, "4")]
  #[case(0.25, "0.25")]
  #[case(0.5, "0.5")]
  #[case(12.34, "12.3")]
  fn test_format_tick(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(expected, format_tick(value));
  }

  #[test]
  fn test_log_axis_maps_back_to_data() {
    let ymap = YMap(Scale::Log { base: 2.0 });
    assert_eq!(Some(3.0), ymap.to_chart(8.0));
    assert_eq!(None, ymap.to_chart(0.0));
    assert_eq!("8", ymap.label(3.0));
  }

  #[test]
  fn test_category_label() {
    let categories = vec!["0.2".to_string(), "0.4".to_string()];
    assert_eq!("0.4", category_label(&categories, 1.0));
    assert_eq!("", category_label(&categories, 0.5));
    assert_eq!("", category_label(&categories, 2.0));
  }

  #[test]
  fn test_log_bounds_cover_data() {
    let mut figure = Figure::new(ChartKind::Line, Axis::linear("x"), Axis::log("y", 2.0));
    figure.series.push(crate::figure::Series {
      label: "row".to_string(),
      points: vec![(0.2, 3.0), (1.0, 100.0)],
      style: PlotStyle::default().series(ChartKind::Line, 0),
    });
    let (lo, hi) = y_bounds(&figure, YMap(figure.y.scale));
    assert_eq!((1.0, 7.0), (lo, hi));
  }
}
