//! Error taxonomy for loading and reporting.

use thiserror::Error;

/// Failures the report core hands back to its caller unmodified.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The backing object could not be read.
    #[error("source '{key}' unavailable: {reason}")]
    SourceUnavailable { key: String, reason: String },
    /// Input did not match the expected columns or types.
    #[error("schema error: {0}")]
    Schema(String),
    /// A report needed at least one row and got none.
    #[error("empty input: {0}")]
    EmptyInput(String),
}

impl PipelineError {
    pub fn source_unavailable(key: &str, err: impl std::fmt::Display) -> Self {
        Self::SourceUnavailable {
            key: key.to_string(),
            reason: err.to_string(),
        }
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Stable identifier used in status payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::SourceUnavailable { .. } => "SourceUnavailableError",
            PipelineError::Schema(_) => "SchemaError",
            PipelineError::EmptyInput(_) => "EmptyInputError",
        }
    }
}
