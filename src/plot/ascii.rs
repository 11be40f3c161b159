//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - scan samples: `o`
//! - interpolated curve: `-` line
//! - threshold levels: `.` rows
//! - valid crossing bounds: `|` verticals from the axis up to the level

use crate::scan::{CrossingFinder, ScanSummary};

/// Render the scan curve with thresholds and crossing markers.
///
/// The y-axis is fixed to `[0, y_max]`; samples above `y_max` are simply not
/// drawn (they are still part of the curve).
pub fn render_ascii_plot(
    finder: &CrossingFinder,
    summary: &ScanSummary,
    y_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let y_max = if y_max.is_finite() && y_max > 0.0 { y_max } else { 6.5 };

    let curve = finder.curve();
    let x_min = curve.x_min();
    let x_max = curve.x_max();

    let mut grid = vec![vec![' '; width]; height];

    // Threshold rows first, so the curve and markers overlay them.
    for level in &summary.levels {
        if level.level < 0.0 || level.level > y_max {
            continue;
        }
        let row = map_y(level.level, y_max, height);
        for cell in &mut grid[row] {
            *cell = '.';
        }
    }

    // Vertical bars at valid crossing bounds, from the axis up to the level.
    for level in &summary.levels {
        if level.level < 0.0 || level.level > y_max {
            continue;
        }
        let top = map_y(level.level, y_max, height);
        for c in &level.intervals {
            if c.valid_lo {
                draw_vertical(&mut grid, map_x(c.lo, x_min, x_max, width), top);
            }
            if c.valid_hi {
                draw_vertical(&mut grid, map_x(c.hi, x_min, x_max, width), top);
            }
        }
    }

    // Interpolated curve.
    let (gx, gy) = finder.grid(width.max(2));
    let mut prev = None;
    for (x, y) in gx.iter().zip(gy.iter()) {
        if *y < 0.0 || *y > y_max {
            prev = None;
            continue;
        }
        let col = map_x(*x, x_min, x_max, width);
        let row = map_y(*y, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(&mut grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }

    // Samples on top.
    for s in curve.samples() {
        if s.y < 0.0 || s.y > y_max {
            continue;
        }
        let col = map_x(s.x, x_min, x_max, width);
        let row = map_y(s.y, y_max, height);
        grid[row][col] = 'o';
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[0, {y_max:.2}] | best fit={:.3}\n",
        summary.best_fit
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = (y / y_max).clamp(0.0, 1.0);
    // y = y_max -> row 0 (top).
    (height as f64 - 1.0 - u * (height as f64 - 1.0)).round() as usize
}

fn draw_vertical(grid: &mut [Vec<char>], col: usize, top_row: usize) {
    let height = grid.len();
    for row in top_row..height {
        if grid[row][col] == ' ' || grid[row][col] == '.' {
            grid[row][col] = '|';
        }
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && matches!(grid[y0 as usize][x0 as usize], ' ' | '.')
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{ScanCurve, summarize};

    fn fixture() -> (CrossingFinder, ScanSummary) {
        let raw = [(-1.0, 4.0), (-0.5, 1.0), (0.0, 0.0), (0.5, 1.0), (1.0, 4.0)];
        let finder = CrossingFinder::new(ScanCurve::build(&raw, 10.0).unwrap()).unwrap();
        let summary = summarize(&finder, &[1.0]).unwrap();
        (finder, summary)
    }

    #[test]
    fn plot_is_deterministic_and_sized() {
        let (finder, summary) = fixture();
        let a = render_ascii_plot(&finder, &summary, 6.5, 60, 20);
        let b = render_ascii_plot(&finder, &summary, 6.5, 60, 20);
        assert_eq!(a, b);

        let lines: Vec<&str> = a.lines().collect();
        // Header + grid rows.
        assert_eq!(lines.len(), 21);
        assert!(lines[1..].iter().all(|l| l.chars().count() == 60));
    }

    #[test]
    fn plot_contains_samples_curve_and_markers() {
        let (finder, summary) = fixture();
        let plot = render_ascii_plot(&finder, &summary, 6.5, 60, 20);
        assert!(plot.contains('o'));
        assert!(plot.contains('-'));
        assert!(plot.contains('.'));
        assert!(plot.contains('|'));
    }
}
