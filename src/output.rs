//! Output formatting and persistence for analysis reports.
//!
//! Reports are logged as structured events, and can be written to CSV files
//! for inspection outside of the pipeline.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::reports::Reports;

/// Logs all three reports.
pub fn log_reports(reports: &Reports) {
    let s = &reports.summary;
    info!(
        start_year = s.start_year,
        end_year = s.end_year,
        rows = s.rows,
        mean = s.mean,
        stddev = s.stddev,
        "Population summary"
    );

    info!(series = reports.best_years.len(), "Best years per series_id");
    for best in &reports.best_years {
        debug!(series_id = %best.series_id, year = best.year, value = best.value, "Best year");
    }

    info!(rows = reports.filtered_report.len(), "Filtered report");
    for row in &reports.filtered_report {
        info!(
            series_id = %row.series_id,
            year = row.year,
            period = %row.period,
            value = row.value,
            population = row.population,
            "Filtered report row"
        );
    }
}

/// Logs reports as pretty-printed JSON.
pub fn print_json(reports: &Reports) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(reports)?);
    Ok(())
}

/// Writes `population_summary.csv`, `best_years.csv` and
/// `filtered_report.csv` into `dir`, replacing earlier files.
pub fn write_report_csvs(dir: &Path, reports: &Reports) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    write_rows(&dir.join("population_summary.csv"), std::slice::from_ref(&reports.summary))?;
    write_rows(&dir.join("best_years.csv"), &reports.best_years)?;
    write_rows(&dir.join("filtered_report.csv"), &reports.filtered_report)?;

    info!(dir = %dir.display(), "Report CSVs written");
    Ok(())
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV");

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{BestYear, JoinedRow, PopulationSummary};
    use std::fs;

    fn sample() -> Reports {
        Reports {
            summary: PopulationSummary {
                start_year: 2013,
                end_year: 2018,
                rows: 2,
                mean: 25.0,
                stddev: 50f64.sqrt(),
            },
            best_years: vec![
                BestYear {
                    series_id: "A".into(),
                    year: 2020,
                    value: 100.0,
                },
                BestYear {
                    series_id: "B".into(),
                    year: 2021,
                    value: 75.0,
                },
            ],
            filtered_report: vec![JoinedRow {
                series_id: "X".into(),
                year: 2015,
                period: "Q01".into(),
                value: 1.5,
                population: 100,
            }],
        }
    }

    #[test]
    fn test_log_and_print_do_not_panic() {
        let reports = sample();
        log_reports(&reports);
        print_json(&reports).unwrap();
    }

    #[test]
    fn test_write_report_csvs() {
        let dir = tempfile::tempdir().unwrap();
        write_report_csvs(dir.path(), &sample()).unwrap();

        let best = fs::read_to_string(dir.path().join("best_years.csv")).unwrap();
        let lines: Vec<_> = best.lines().collect();
        assert_eq!(lines, vec!["series_id,year,value", "A,2020,100.0", "B,2021,75.0"]);

        let joined = fs::read_to_string(dir.path().join("filtered_report.csv")).unwrap();
        assert!(joined.starts_with("series_id,year,period,value,Population\n"));

        let summary = fs::read_to_string(dir.path().join("population_summary.csv")).unwrap();
        assert_eq!(summary.lines().count(), 2);
    }

    #[test]
    fn test_write_report_csvs_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        write_report_csvs(dir.path(), &sample()).unwrap();
        write_report_csvs(dir.path(), &sample()).unwrap();

        let best = fs::read_to_string(dir.path().join("best_years.csv")).unwrap();
        assert_eq!(best.lines().count(), 3);
    }
}
