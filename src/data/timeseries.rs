use csv::{ReaderBuilder, StringRecord, Trim};
use flate2::read::GzDecoder;
use serde::Serialize;
use std::borrow::Cow;
use std::io::Read;

use crate::error::PipelineError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// One row of a BLS `pr.data.*` file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesRecord {
    pub series_id: String,
    pub year: i32,
    pub period: String,
    /// NaN when the source cell was blank.
    pub value: f64,
    pub footnote_codes: String,
}

struct Columns {
    series_id: usize,
    year: usize,
    period: usize,
    value: usize,
    footnote_codes: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, PipelineError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                PipelineError::schema(format!("time-series input is missing column `{name}`"))
            })
        };

        Ok(Self {
            series_id: require("series_id")?,
            year: require("year")?,
            period: require("period")?,
            value: require("value")?,
            footnote_codes: find("footnote_codes"),
        })
    }
}

/// Parses a tab-separated time-series file, gunzipping it first if needed.
///
/// A blank `value` cell becomes NaN so it propagates through sums instead of
/// being dropped. Any other non-numeric value is a schema error.
pub fn parse_timeseries(bytes: &[u8]) -> Result<Vec<TimeSeriesRecord>, PipelineError> {
    let text = decompress(bytes)?;

    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .trim(Trim::All)
        .quoting(false)
        .flexible(true)
        .from_reader(text.as_ref());

    let headers = rdr
        .headers()
        .map_err(|e| PipelineError::schema(format!("unreadable time-series header: {e}")))?
        .clone();
    let cols = Columns::locate(&headers)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result
            .map_err(|e| PipelineError::schema(format!("unreadable time-series row: {e}")))?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() > headers.len() {
            return Err(PipelineError::schema(format!(
                "line {line}: expected at most {} fields, found {}",
                headers.len(),
                record.len()
            )));
        }
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let year = cell(cols.year).parse::<i32>().map_err(|_| {
            PipelineError::schema(format!(
                "line {line}: year `{}` is not an integer",
                cell(cols.year)
            ))
        })?;

        let raw_value = cell(cols.value);
        let value = if raw_value.is_empty() {
            f64::NAN
        } else {
            raw_value.parse::<f64>().map_err(|_| {
                PipelineError::schema(format!("line {line}: value `{raw_value}` is not a number"))
            })?
        };

        rows.push(TimeSeriesRecord {
            series_id: cell(cols.series_id).to_string(),
            year,
            period: cell(cols.period).to_string(),
            value,
            footnote_codes: cols.footnote_codes.map(cell).unwrap_or("").to_string(),
        });
    }

    Ok(rows)
}

fn decompress(bytes: &[u8]) -> Result<Cow<'_, [u8]>, PipelineError> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(Cow::Borrowed(bytes));
    }

    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|e| PipelineError::schema(format!("corrupt gzip time-series input: {e}")))?;
    Ok(Cow::Owned(out))
}
