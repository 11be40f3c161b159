//! Scan CSV ingest and normalization.
//!
//! This module turns fitting-engine output CSVs into raw (x, y) pairs with
//! `y = 2 * deltaNLL`, ready for curve curation.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Chaining**: several result files merge into one scan, in file order
//! - **Separation of concerns**: no curve logic here
//!
//! Expected columns (header names matched case-insensitively):
//! - the POI column, named by the run configuration (e.g. `r`)
//! - `deltaNLL`
//! - optionally `quantileExpected`; rows with values `<= -1.5` are dropped
//!   (the fitting engine marks failed branch points that way)

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::error::AppError;

/// Quantile value at or below which a row is considered a failed fit branch.
const QUANTILE_CUT: f64 = -1.5;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub file: String,
    pub line: usize,
    pub message: String,
}

/// Ingest output: raw merged points + bookkeeping.
#[derive(Debug, Clone)]
pub struct IngestedScan {
    /// Raw (x, y) pairs in file order, y already doubled to `-2 Δln L`.
    pub points: Vec<(f64, f64)>,
    pub rows_read: usize,
    pub rows_used: usize,
    pub row_errors: Vec<RowError>,
}

/// Read and merge one scan from one or more CSV files.
pub fn read_scan_points(files: &[PathBuf], poi: &str) -> Result<IngestedScan, AppError> {
    if files.is_empty() {
        return Err(AppError::input("No input files given for scan."));
    }

    let mut out = IngestedScan {
        points: Vec::new(),
        rows_read: 0,
        rows_used: 0,
        row_errors: Vec::new(),
    };

    for path in files {
        let file = File::open(path)
            .map_err(|e| AppError::input(format!("Failed to open scan CSV '{}': {e}", path.display())))?;
        parse_scan_csv(file, poi, &path.display().to_string(), &mut out)?;
    }

    if out.points.is_empty() {
        return Err(AppError::input(format!(
            "No usable scan rows found in {} file(s) ({} read, {} row errors).",
            files.len(),
            out.rows_read,
            out.row_errors.len()
        )));
    }

    Ok(out)
}

/// Parse one CSV stream into `out`. Split out from the file handling so the
/// parser is testable on in-memory data.
pub fn parse_scan_csv(
    reader: impl Read,
    poi: &str,
    source: &str,
    out: &mut IngestedScan,
) -> Result<(), AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers in '{source}': {e}")))?
        .clone();

    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };

    let poi_idx = col(poi).ok_or_else(|| {
        AppError::input(format!("Missing POI column '{poi}' in '{source}' (headers: {headers:?})."))
    })?;
    let dnll_idx = col("deltaNLL")
        .ok_or_else(|| AppError::input(format!("Missing 'deltaNLL' column in '{source}'.")))?;
    let quantile_idx = col("quantileExpected");

    for (i, record) in rdr.records().enumerate() {
        // Header is line 1.
        let line = i + 2;
        out.rows_read += 1;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                out.row_errors.push(RowError {
                    file: source.to_string(),
                    line,
                    message: format!("Malformed row: {e}"),
                });
                continue;
            }
        };

        let field = |idx: usize, name: &str| -> Result<f64, String> {
            let raw = record
                .get(idx)
                .ok_or_else(|| format!("Missing '{name}' field"))?;
            raw.parse::<f64>()
                .map_err(|_| format!("Invalid '{name}' value '{raw}'"))
        };

        if let Some(qi) = quantile_idx {
            match field(qi, "quantileExpected") {
                Ok(q) if q <= QUANTILE_CUT => continue,
                Ok(_) => {}
                Err(message) => {
                    out.row_errors.push(RowError {
                        file: source.to_string(),
                        line,
                        message,
                    });
                    continue;
                }
            }
        }

        let x = field(poi_idx, poi);
        let dnll = field(dnll_idx, "deltaNLL");
        match (x, dnll) {
            (Ok(x), Ok(dnll)) => {
                out.points.push((x, 2.0 * dnll));
                out.rows_used += 1;
            }
            (Err(message), _) | (_, Err(message)) => {
                out.row_errors.push(RowError {
                    file: source.to_string(),
                    line,
                    message,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str, poi: &str) -> IngestedScan {
        let mut out = IngestedScan {
            points: Vec::new(),
            rows_read: 0,
            rows_used: 0,
            row_errors: Vec::new(),
        };
        parse_scan_csv(data.as_bytes(), poi, "test.csv", &mut out).unwrap();
        out
    }

    #[test]
    fn parses_and_doubles_deltanll() {
        let out = parse("r,deltaNLL\n0.0,0.0\n0.5,0.5\n1.0,2.0\n", "r");
        assert_eq!(out.points, vec![(0.0, 0.0), (0.5, 1.0), (1.0, 4.0)]);
        assert_eq!(out.rows_used, 3);
        assert!(out.row_errors.is_empty());
    }

    #[test]
    fn applies_quantile_cut() {
        let out = parse(
            "r,deltaNLL,quantileExpected\n0.0,0.0,1.0\n0.5,0.5,-2.0\n1.0,2.0,0.0\n",
            "r",
        );
        assert_eq!(out.points.len(), 2);
        assert_eq!(out.rows_read, 3);
        assert_eq!(out.rows_used, 2);
    }

    #[test]
    fn headers_match_case_insensitively() {
        let out = parse("CTW,DELTANLL\n0.1,0.2\n", "ctW");
        assert_eq!(out.points, vec![(0.1, 0.4)]);
    }

    #[test]
    fn bad_rows_are_collected_not_fatal() {
        let out = parse("r,deltaNLL\n0.0,0.0\nnope,1.0\n1.0,abc\n2.0,1.0\n", "r");
        assert_eq!(out.points.len(), 2);
        assert_eq!(out.row_errors.len(), 2);
        assert_eq!(out.row_errors[0].line, 3);
    }

    #[test]
    fn missing_poi_column_is_fatal() {
        let mut out = IngestedScan {
            points: Vec::new(),
            rows_read: 0,
            rows_used: 0,
            row_errors: Vec::new(),
        };
        let err = parse_scan_csv("a,deltaNLL\n1,2\n".as_bytes(), "r", "test.csv", &mut out).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
