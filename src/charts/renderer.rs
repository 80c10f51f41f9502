//! Static Chart Renderer
//! Renders the current view to a PNG file with plotters.
//!
//! Layout:
//! 1. Title centered on top
//! 2. Bars: horizontal, best first, colour gradient; category names on the left
//! 3. Trend: line with circle markers and a light grid

use super::spec::{ChartLabels, ChartSpec};
use super::plotter::Palette;
use plotters::prelude::*;
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const EXPORT_WIDTH: u32 = 1400;
pub const EXPORT_HEIGHT: u32 = 800;

const TREND_RGB: RGBColor = RGBColor(31, 119, 180);
const GRID_RGB: RGBColor = RGBColor(220, 220, 220);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to render for this view")]
    NothingToRender,
    #[error("Failed to prepare output: {0}")]
    Io(#[from] io::Error),
    #[error("Drawing failed: {0}")]
    Draw(String),
}

fn draw_failed(err: impl Display) -> RenderError {
    RenderError::Draw(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a chart to `path`, creating the parent directory if needed.
    pub fn render_png(
        spec: &ChartSpec,
        labels: &ChartLabels,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        match spec {
            ChartSpec::Bars { bars, .. } if bars.is_empty() => {
                return Err(RenderError::NothingToRender)
            }
            ChartSpec::Trend { points } if points.is_empty() => {
                return Err(RenderError::NothingToRender)
            }
            _ => {}
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_failed)?;

        match spec {
            ChartSpec::Bars { bars, palette } => Self::draw_bars(&root, bars, *palette, labels)?,
            ChartSpec::Trend { points } => Self::draw_trend(&root, points, labels)?,
        }

        root.present().map_err(draw_failed)?;
        info!(path = %path.display(), "exported chart");
        Ok(())
    }

    fn draw_bars<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        bars: &[(String, f64)],
        palette: Palette,
        labels: &ChartLabels,
    ) -> Result<(), RenderError> {
        let n = bars.len();
        let max = bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
        let x_max = if max > 0.0 { max * 1.05 } else { 1.0 };
        let longest = bars.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        let label_area = (longest as u32 * 8 + 20).clamp(80, 420);

        let mut chart = ChartBuilder::on(root)
            .caption(&labels.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(label_area)
            .build_cartesian_2d(0.0..x_max, (0..n as i32).into_segmented())
            .map_err(draw_failed)?;

        // Segment i holds row n - 1 - i so the first bar ends up on top.
        let name_of = |segment: &SegmentValue<i32>| match segment {
            SegmentValue::CenterOf(i) if (*i as usize) < n => bars[n - 1 - *i as usize].0.clone(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(labels.value_axis.as_str())
            .y_desc(labels.category_axis.as_str())
            .y_labels(n)
            .y_label_formatter(&name_of)
            .draw()
            .map_err(draw_failed)?;

        chart
            .draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
                let row = (n - 1 - i) as i32;
                let (r, g, b) = palette.rgb_for(i, n);
                let mut bar = Rectangle::new(
                    [
                        (0.0, SegmentValue::Exact(row)),
                        (*value, SegmentValue::Exact(row + 1)),
                    ],
                    RGBColor(r, g, b).filled(),
                );
                bar.set_margin(3, 3, 0, 0);
                bar
            }))
            .map_err(draw_failed)?;

        Ok(())
    }

    fn draw_trend<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        points: &[(i64, f64)],
        labels: &ChartLabels,
    ) -> Result<(), RenderError> {
        let first = points.iter().map(|(x, _)| *x).min().unwrap_or(0);
        let last = points.iter().map(|(x, _)| *x).max().unwrap_or(0);
        let max = points.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max);
        let y_max = if max > 0.0 { max * 1.1 } else { 1.0 };

        let mut chart = ChartBuilder::on(root)
            .caption(&labels.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(first..last + 1, 0.0..y_max)
            .map_err(draw_failed)?;

        chart
            .configure_mesh()
            .light_line_style(GRID_RGB.stroke_width(1))
            .x_desc(labels.category_axis.as_str())
            .y_desc(labels.value_axis.as_str())
            .x_label_formatter(&|year| year.to_string())
            .draw()
            .map_err(draw_failed)?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), TREND_RGB.stroke_width(2)))
            .map_err(draw_failed)?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, TREND_RGB.filled())),
            )
            .map_err(draw_failed)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_charts_are_not_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("empty.png");

        let bars = ChartSpec::Bars {
            bars: Vec::new(),
            palette: Palette::Rocket,
        };
        let result = StaticChartRenderer::render_png(
            &bars,
            &ChartLabels::default(),
            &path,
            EXPORT_WIDTH,
            EXPORT_HEIGHT,
        );

        assert!(matches!(result, Err(RenderError::NothingToRender)));
        assert!(!path.exists());
    }
}
