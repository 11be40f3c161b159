//! Plotters-powered SVG chart export.
//!
//! Why Plotters?
//! - nicer axis + mesh rendering than hand-rolled SVG
//! - less manual work for ticks/labels
//! - easy to extend later (more annotations, PNG backend, etc.)
//!
//! The chart is intentionally data-driven: all series and bounds are
//! computed outside the render call. This keeps rendering focused on drawing
//! and makes the data prep testable separately.

use std::path::Path;

use plotters::prelude::*;

use crate::error::AppError;

/// Stroke palette indexed by the `--others FILE:LABEL:COLOR` color field.
const PALETTE: &[RGBColor] = &[BLACK, RED, BLUE, GREEN, MAGENTA, CYAN];

/// One rendered scan: interpolant line + sample markers.
pub struct ChartSeries<'a> {
    pub label: &'a str,
    /// Palette index (0 = black, like the main scan default).
    pub color: usize,
    /// Interpolant sampled on a regular grid.
    pub curve: &'a [(f64, f64)],
    /// Raw scan samples.
    pub points: &'a [(f64, f64)],
}

/// A lightweight, render-only chart description.
pub struct ScanChart<'a> {
    /// X-axis label (translated POI name).
    pub x_label: &'a str,
    /// Caption printed above the plot (central value text).
    pub caption: String,
    /// Y-axis maximum; the axis always starts at 0.
    pub y_max: f64,
    /// Horizontal threshold lines.
    pub levels: &'a [f64],
    /// Vertical crossing markers as (x, level) pairs, drawn from the axis
    /// up to the level line.
    pub crossings: &'a [(f64, f64)],
    /// Scans to draw; the first is the main scan (thicker stroke).
    pub series: Vec<ChartSeries<'a>>,
}

impl ScanChart<'_> {
    /// Render the chart to an SVG file.
    pub fn write_svg(&self, path: &Path, width: u32, height: u32) -> Result<(), AppError> {
        self.draw(path, width, height).map_err(|e| {
            AppError::input(format!("Failed to render SVG chart '{}': {e}", path.display()))
        })
    }

    fn draw(&self, path: &Path, width: u32, height: u32) -> Result<(), Box<dyn std::error::Error>> {
        let (x0, x1) = self.x_bounds().ok_or("No finite x-range to plot")?;
        let y_max = if self.y_max.is_finite() && self.y_max > 0.0 {
            self.y_max
        } else {
            6.5
        };

        let root = SVGBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(&self.caption, ("sans-serif", 22))
            .set_label_area_size(LabelAreaPosition::Left, 55)
            .set_label_area_size(LabelAreaPosition::Bottom, 45)
            .build_cartesian_2d(x0..x1, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_desc(self.x_label)
            .y_desc("-2 dln L")
            .draw()?;

        // Threshold lines and crossing markers go underneath the curves.
        let guide = RGBColor(128, 128, 128);
        for &level in self.levels {
            if level <= 0.0 || level > y_max {
                continue;
            }
            chart.draw_series(LineSeries::new([(x0, level), (x1, level)], guide.stroke_width(1)))?;
        }
        for &(x, level) in self.crossings {
            if level <= 0.0 || level > y_max {
                continue;
            }
            chart.draw_series(LineSeries::new([(x, 0.0), (x, level)], guide.stroke_width(1)))?;
        }

        for (i, s) in self.series.iter().enumerate() {
            let color = PALETTE[s.color % PALETTE.len()];
            let stroke = if i == 0 { 3 } else { 1 };

            chart
                .draw_series(LineSeries::new(
                    s.curve.iter().copied().filter(|(_, y)| *y >= 0.0 && *y <= y_max),
                    color.stroke_width(stroke),
                ))?
                .label(s.label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(stroke))
                });

            chart.draw_series(
                s.points
                    .iter()
                    .filter(|(_, y)| *y >= 0.0 && *y <= y_max)
                    .map(|&(x, y)| Circle::new((x, y), 2, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    fn x_bounds(&self) -> Option<(f64, f64)> {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        for s in &self.series {
            for &(x, _) in s.curve {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
            }
        }
        if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
            Some((min_x, max_x))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_bounds_span_all_series() {
        let main = [(-1.0, 4.0), (1.0, 4.0)];
        let other = [(-2.0, 5.0), (0.5, 5.0)];
        let chart = ScanChart {
            x_label: "r",
            caption: String::new(),
            y_max: 6.5,
            levels: &[],
            crossings: &[],
            series: vec![
                ChartSeries {
                    label: "Observed",
                    color: 0,
                    curve: &main,
                    points: &[],
                },
                ChartSeries {
                    label: "Stat only",
                    color: 1,
                    curve: &other,
                    points: &[],
                },
            ],
        };
        assert_eq!(chart.x_bounds(), Some((-2.0, 1.0)));
    }

    #[test]
    fn x_bounds_empty_when_no_curves() {
        let chart = ScanChart {
            x_label: "r",
            caption: String::new(),
            y_max: 6.5,
            levels: &[],
            crossings: &[],
            series: vec![],
        };
        assert_eq!(chart.x_bounds(), None);
    }
}
