//! The three analyses run over the loaded tables.
//!
//! - [`population_summary`]: windowed mean / sample stddev of population.
//! - [`best_years`]: per-series argmax over yearly sums.
//! - [`filtered_report`]: one series/period joined to population by year.
//!
//! [`run_reports`] runs all three. It is a pure function of its inputs.

pub mod best_year;
pub mod join;
pub mod summary;
pub mod types;
pub mod utility;

pub use best_year::best_years;
pub use join::filtered_report;
pub use summary::population_summary;
pub use types::{BestYear, JoinedRow, PopulationSummary, Reports};

use crate::config::ReportParams;
use crate::data::{PopulationRecord, TimeSeriesRecord};
use crate::error::PipelineError;

/// Computes all three reports.
///
/// # Errors
///
/// Propagates [`PipelineError::EmptyInput`] from the population summary.
pub fn run_reports(
    timeseries: &[TimeSeriesRecord],
    population: &[PopulationRecord],
    params: &ReportParams,
) -> Result<Reports, PipelineError> {
    let summary = population_summary(population, params.start_year, params.end_year)?;
    let best_years = best_years(timeseries);
    let filtered_report = filtered_report(timeseries, population, &params.series_id, &params.period);

    Ok(Reports {
        summary,
        best_years,
        filtered_report,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn ts(series_id: &str, year: i32, period: &str, value: f64) -> TimeSeriesRecord {
        TimeSeriesRecord {
            series_id: series_id.to_string(),
            year,
            period: period.to_string(),
            value,
            footnote_codes: String::new(),
        }
    }

    pub fn pop(year: i32, population: i64) -> PopulationRecord {
        PopulationRecord {
            id_nation: "01000US".to_string(),
            nation: "United States".to_string(),
            id_year: year.to_string(),
            year,
            population,
            slug_nation: "united-states".to_string(),
        }
    }

    fn params() -> ReportParams {
        ReportParams {
            series_id: "X".to_string(),
            ..ReportParams::default()
        }
    }

    #[test]
    fn test_run_reports_combines_all_three() {
        let series = vec![
            ts("X", 2015, "Q01", 1.5),
            ts("X", 2016, "Q01", 2.5),
            ts("Y", 2015, "Q01", 9.0),
        ];
        let population = vec![pop(2015, 100), pop(2016, 300)];

        let reports = run_reports(&series, &population, &params()).unwrap();

        assert_eq!(reports.summary.mean, 200.0);
        assert_eq!(reports.best_years.len(), 2);
        assert_eq!(reports.filtered_report.len(), 2);
    }

    #[test]
    fn test_run_reports_is_repeatable() {
        let series = vec![ts("X", 2015, "Q01", 1.5), ts("X", 2015, "Q02", 0.25)];
        let population = vec![pop(2015, 100), pop(2015, 200), pop(2017, 50)];

        let first = run_reports(&series, &population, &params()).unwrap();
        let second = run_reports(&series, &population, &params()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.summary.stddev.to_bits(), second.summary.stddev.to_bits());
    }

    #[test]
    fn test_run_reports_propagates_empty_window() {
        let series = vec![ts("X", 2015, "Q01", 1.5)];
        let population = vec![pop(1990, 100)];

        assert!(matches!(
            run_reports(&series, &population, &params()),
            Err(PipelineError::EmptyInput(_))
        ));
    }
}
