//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the scan pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, DemoArgs, ScanArgs};
use crate::domain::ScanConfig;
use crate::error::AppError;
use crate::plot::{ChartSeries, ScanChart};

pub mod pipeline;

use pipeline::RunOutput;

/// Entry point for the `nllscan` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Scan(args) => handle_scan(args, OutputMode::Full),
        Command::Intervals(args) => handle_scan(args, OutputMode::IntervalsOnly),
        Command::Demo(args) => handle_demo(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    IntervalsOnly,
}

fn handle_scan(args: ScanArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = scan_config_from_args(&args)?;
    let run = pipeline::run_scan(&config)?;
    let label = crate::report::poi_label(&config.poi, config.translate.as_deref())?;

    match mode {
        OutputMode::Full => {
            println!(
                "{}",
                crate::report::format_run_summary(
                    &label,
                    &run.main.ingest,
                    &run.main.finder,
                    &run.main.summary,
                    &config,
                )
            );
            for other in &run.others {
                if let Some(c) = other.summary.central() {
                    println!("{}: {}", other.label, crate::report::format_central(&label, &c));
                }
            }
        }
        OutputMode::IntervalsOnly => {
            println!("{}", crate::report::format_intervals(&run.main.summary));
        }
    }

    if let Some(breakdown) = &run.breakdown {
        for warning in &breakdown.warnings {
            eprintln!("WARNING: {warning}");
        }
        println!(
            "{}",
            crate::report::format_breakdown(&label, run.main.summary.best_fit, breakdown)
        );
    }

    if mode == OutputMode::Full && config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.main.finder,
            &run.main.summary,
            config.y_max,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::write_intervals_csv(path, &run.main.label, &run.main.summary)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::write_scan_json(
            path,
            &config.poi,
            &label,
            config.y_cut,
            &run.main.finder,
            &run.main.summary,
        )?;
    }
    if let Some(path) = &config.export_svg {
        write_chart(path, &label, &config, &run)?;
    }

    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let spec = crate::data::DemoSpec {
        n_points: args.points,
        seed: args.seed,
        best_fit: args.best_fit,
        sigma_lo: args.sigma_lo,
        sigma_hi: args.sigma_hi,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
    };
    let points = crate::data::generate_scan(&spec)?;
    crate::io::write_scan_csv(&args.output, &args.poi, &points)?;

    println!(
        "Wrote {} scan points to '{}' (poi={}).",
        points.len(),
        args.output.display(),
        args.poi
    );
    Ok(())
}

fn write_chart(
    path: &std::path::Path,
    label: &str,
    config: &ScanConfig,
    run: &RunOutput,
) -> Result<(), AppError> {
    // Materialize curve grids and sample points per scan; the chart only
    // borrows them.
    let mut prepared = Vec::with_capacity(run.others.len() + 1);
    for scan in std::iter::once(&run.main).chain(run.others.iter()) {
        let (gx, gy) = scan.finder.grid(200);
        let curve: Vec<(f64, f64)> = gx.into_iter().zip(gy).collect();
        let points: Vec<(f64, f64)> = scan
            .finder
            .curve()
            .samples()
            .iter()
            .map(|s| (s.x, s.y))
            .collect();
        prepared.push((scan.label.clone(), scan.color, curve, points));
    }

    let series: Vec<ChartSeries<'_>> = prepared
        .iter()
        .map(|(label, color, curve, points)| ChartSeries {
            label: label.as_str(),
            color: *color,
            curve: curve.as_slice(),
            points: points.as_slice(),
        })
        .collect();

    // Vertical markers at the main scan's valid crossing bounds.
    let mut crossings = Vec::new();
    for level in &run.main.summary.levels {
        for c in &level.intervals {
            if c.valid_lo {
                crossings.push((c.lo, level.level));
            }
            if c.valid_hi {
                crossings.push((c.hi, level.level));
            }
        }
    }

    let caption = match run.main.summary.central() {
        Some(c) => crate::report::format_central(label, &c),
        None => label.to_string(),
    };

    let chart = ScanChart {
        x_label: label,
        caption,
        y_max: config.y_max,
        levels: &config.levels,
        crossings: &crossings,
        series,
    };
    chart.write_svg(path, 700, 600)
}

pub fn scan_config_from_args(args: &ScanArgs) -> Result<ScanConfig, AppError> {
    if args.levels.is_empty() {
        return Err(AppError::input("At least one threshold level is required."));
    }
    for level in &args.levels {
        if !level.is_finite() {
            return Err(AppError::input(format!("Threshold level must be finite, got {level}.")));
        }
    }
    if !(args.y_cut.is_finite() && args.y_cut > 0.0) {
        return Err(AppError::input(format!("y-cut must be finite and > 0, got {}.", args.y_cut)));
    }

    let others = args
        .others
        .iter()
        .enumerate()
        .map(|(i, spec)| crate::cli::parse_other_spec(spec, i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScanConfig {
        main: args.main.clone(),
        others,
        poi: args.poi.clone(),
        translate: args.translate.clone(),
        main_label: args.main_label.clone(),
        y_cut: args.y_cut,
        y_max: args.y_max,
        levels: args.levels.clone(),
        breakdown: args.breakdown.clone(),
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_json: args.export_json.clone(),
        export_csv: args.export_csv.clone(),
        export_svg: args.svg.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn config_resolves_other_specs_with_default_colors() {
        let cli = crate::cli::Cli::parse_from([
            "nllscan",
            "scan",
            "main.csv",
            "--others",
            "a.csv:A",
            "b.csv:B:4",
        ]);
        let crate::cli::Command::Scan(args) = cli.command else {
            panic!("expected scan subcommand");
        };
        let config = scan_config_from_args(&args).unwrap();
        assert_eq!(config.others.len(), 2);
        assert_eq!(config.others[0].color, 1);
        assert_eq!(config.others[1].color, 4);
    }

    #[test]
    fn config_rejects_empty_levels() {
        let mut args = match crate::cli::Cli::parse_from(["nllscan", "scan", "main.csv"]).command {
            crate::cli::Command::Scan(args) => args,
            _ => unreachable!(),
        };
        args.levels.clear();
        assert_eq!(scan_config_from_args(&args).unwrap_err().exit_code(), 2);
    }
}
