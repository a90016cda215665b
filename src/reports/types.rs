//! Result types produced by the report pipeline.

use serde::Serialize;

/// Population statistics over an inclusive year window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationSummary {
    pub start_year: i32,
    pub end_year: i32,
    /// Number of population rows inside the window.
    pub rows: usize,
    pub mean: f64,
    /// Sample (N-1) standard deviation; NaN for a single row.
    pub stddev: f64,
}

/// The year with the largest summed value for one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestYear {
    pub series_id: String,
    pub year: i32,
    pub value: f64,
}

/// A time-series row joined with a matching population figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedRow {
    pub series_id: String,
    pub year: i32,
    pub period: String,
    pub value: f64,
    #[serde(rename = "Population")]
    pub population: i64,
}

/// Everything a single analysis run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reports {
    pub summary: PopulationSummary,
    pub best_years: Vec<BestYear>,
    pub filtered_report: Vec<JoinedRow>,
}
