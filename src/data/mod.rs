//! Input tables and the sources they are loaded from.
//!
//! Both parsers trim every string (including column names) and reject
//! malformed input with [`PipelineError::Schema`](crate::error::PipelineError)
//! before any report runs.

mod population;
mod source;
mod timeseries;

pub use population::{PopulationRecord, parse_population};
pub use source::{LocalFiles, StoreSource, TabularSource};
pub use timeseries::{TimeSeriesRecord, parse_timeseries};
