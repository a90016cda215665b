//! Runtime configuration read from the environment.
//!
//! Every value except `BUCKET_NAME` has a default matching the public data
//! sources the pipeline was built against:
//!
//! ```text
//! BUCKET_NAME=rearcquestv2
//! BLS_BASE_URL=https://download.bls.gov/pub/time.series/pr/
//! POPULATION_API_URL=https://datausa.io/api/data?drilldowns=Nation&measures=Population
//! BLS_PREFIX=bls-data/
//! POPULATION_KEY=population-data/population.json
//! TIMESERIES_KEY=bls-data/pr.data.0.Current
//! ```

use anyhow::{Context, Result, anyhow};

pub const DEFAULT_BLS_BASE_URL: &str = "https://download.bls.gov/pub/time.series/pr/";
pub const DEFAULT_POPULATION_API_URL: &str =
    "https://datausa.io/api/data?drilldowns=Nation&measures=Population";
pub const DEFAULT_BLS_PREFIX: &str = "bls-data/";
pub const DEFAULT_POPULATION_KEY: &str = "population-data/population.json";
pub const DEFAULT_TIMESERIES_KEY: &str = "bls-data/pr.data.0.Current";
/// Placeholder contact string; deployments set `HTTP_USER_AGENT` to a real one.
pub const DEFAULT_USER_AGENT: &str = "bls_pipeline/0.1 (contact@example.com)";

/// Parameters for the three reports.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportParams {
    /// Inclusive lower bound of the population window.
    pub start_year: i32,
    /// Inclusive upper bound of the population window.
    pub end_year: i32,
    pub series_id: String,
    pub period: String,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            start_year: 2013,
            end_year: 2018,
            series_id: "PRS30006032".to_string(),
            period: "Q01".to_string(),
        }
    }
}

impl ReportParams {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds parameters from an arbitrary variable lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let start_year = parse_year(&lookup, "SUMMARY_START_YEAR", defaults.start_year)?;
        let end_year = parse_year(&lookup, "SUMMARY_END_YEAR", defaults.end_year)?;
        if start_year > end_year {
            return Err(anyhow!(
                "SUMMARY_START_YEAR ({start_year}) is after SUMMARY_END_YEAR ({end_year})"
            ));
        }

        Ok(Self {
            start_year,
            end_year,
            series_id: lookup("REPORT_SERIES_ID").unwrap_or(defaults.series_id),
            period: lookup("REPORT_PERIOD").unwrap_or(defaults.period),
        })
    }
}

fn parse_year(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: i32) -> Result<i32> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be an integer year, got '{raw}'")),
        None => Ok(default),
    }
}

/// Storage locations and upstream endpoints shared by both functions.
#[derive(Debug, Clone)]
pub struct Config {
    pub bucket: String,
    pub bls_base_url: String,
    pub population_url: String,
    pub bls_prefix: String,
    pub population_key: String,
    pub timeseries_key: String,
    pub user_agent: String,
    pub report: ReportParams,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bucket = lookup("BUCKET_NAME")
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| anyhow!("BUCKET_NAME must be set"))?;

        let mut bls_prefix =
            lookup("BLS_PREFIX").unwrap_or_else(|| DEFAULT_BLS_PREFIX.to_string());
        if !bls_prefix.is_empty() && !bls_prefix.ends_with('/') {
            bls_prefix.push('/');
        }

        Ok(Self {
            bucket,
            bls_base_url: lookup("BLS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BLS_BASE_URL.to_string()),
            population_url: lookup("POPULATION_API_URL")
                .unwrap_or_else(|| DEFAULT_POPULATION_API_URL.to_string()),
            bls_prefix,
            population_key: lookup("POPULATION_KEY")
                .unwrap_or_else(|| DEFAULT_POPULATION_KEY.to_string()),
            timeseries_key: lookup("TIMESERIES_KEY")
                .unwrap_or_else(|| DEFAULT_TIMESERIES_KEY.to_string()),
            user_agent: lookup("HTTP_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            report: ReportParams::from_lookup(&lookup)?,
        })
    }
}
