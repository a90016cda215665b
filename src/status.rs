//! Invocation status payloads returned by the Lambda handlers.
//!
//! The report core never degrades on its own; these builders are where a
//! failed run is turned into a `500` payload instead of a failed invocation.

use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};

use crate::collector::CollectorOutcome;
use crate::error::PipelineError;
use crate::reports::Reports;

/// `{"statusCode": ..., "body": "<json>"}`, the shape API-style callers expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON document encoded as a string.
    pub body: String,
}

impl StatusResponse {
    fn new(status_code: u16, mut body: Value) -> Self {
        if let Some(obj) = body.as_object_mut() {
            obj.insert("completed_at".to_string(), json!(Utc::now()));
        }
        Self {
            status_code,
            body: body.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// The collector reports `500` only when the population upload failed; a
/// failed BLS sync is carried in the body with zero counts.
pub fn collector_status(outcome: &CollectorOutcome) -> StatusResponse {
    let bls_sync = match &outcome.bls_sync {
        Ok(summary) => json!(summary),
        Err(e) => json!({
            "synced_files_count": 0,
            "deleted_files_count": 0,
            "error": format!("{e:#}"),
        }),
    };
    let population_ok = outcome.population.is_ok();

    StatusResponse::new(
        if population_ok { 200 } else { 500 },
        json!({
            "bls_sync": bls_sync,
            "population_upload_success": population_ok,
        }),
    )
}

pub fn analyzer_status(result: &Result<Reports, PipelineError>) -> StatusResponse {
    match result {
        Ok(reports) => StatusResponse::new(
            200,
            json!({
                "Message": "Data processed and logged successfully",
                "reports": reports,
            }),
        ),
        Err(e) => StatusResponse::new(
            500,
            json!({
                "Message": "Data processing failed",
                "error_kind": e.kind(),
                "error": e.to_string(),
            }),
        ),
    }
}
