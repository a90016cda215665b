//! Queue-triggered analysis: load both tables, then run the reports.

use aws_lambda_events::event::s3::S3Event;
use aws_lambda_events::event::sqs::SqsEvent;
use tracing::{debug, info};

use crate::config::ReportParams;
use crate::data::TabularSource;
use crate::error::PipelineError;
use crate::reports::{Reports, run_reports};

/// Loads both tables and computes the reports.
///
/// Both tables are loaded before any report runs, so schema problems surface
/// before partial results exist.
pub async fn analyze<S>(source: &S, params: &ReportParams) -> Result<Reports, PipelineError>
where
    S: TabularSource + ?Sized,
{
    let timeseries = source.load_timeseries().await?;
    let population = source.load_population().await?;
    info!(
        timeseries_rows = timeseries.len(),
        population_rows = population.len(),
        "Tables loaded"
    );

    run_reports(&timeseries, &population, params)
}

/// Object keys named by S3 notifications carried in the SQS message bodies.
///
/// Bodies that are not S3 notifications (such as `s3:TestEvent`) are skipped.
pub fn created_keys(event: &SqsEvent) -> Vec<String> {
    event
        .records
        .iter()
        .filter_map(|msg| msg.body.as_deref())
        .filter_map(|body| match serde_json::from_str::<S3Event>(body) {
            Ok(notification) => Some(notification),
            Err(e) => {
                debug!(error = %e, "SQS message is not an S3 notification");
                None
            }
        })
        .flat_map(|notification| notification.records)
        .filter_map(|record| record.s3.object.key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::data::StoreSource;
    use serde_json::json;

    fn s3_notification(key: &str) -> String {
        json!({
            "Records": [{
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventTime": "2025-01-29T12:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "userIdentity": {"principalId": "AWS:EXAMPLE"},
                "requestParameters": {"sourceIPAddress": "10.0.0.1"},
                "responseElements": {},
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "configurationId": "population-upload",
                    "bucket": {
                        "name": "rearcquestv2",
                        "ownerIdentity": {"principalId": "EXAMPLE"},
                        "arn": "arn:aws:s3:::rearcquestv2"
                    },
                    "object": {
                        "key": key,
                        "size": 1024,
                        "eTag": "0123456789abcdef",
                        "sequencer": "0A1B2C3D4E5F678901"
                    }
                }
            }]
        })
        .to_string()
    }

    fn sqs_event(bodies: &[String]) -> SqsEvent {
        let records: Vec<_> = bodies
            .iter()
            .enumerate()
            .map(|(i, body)| {
                json!({
                    "messageId": format!("msg-{i}"),
                    "receiptHandle": "handle",
                    "body": body,
                    "attributes": {},
                    "messageAttributes": {},
                    "md5OfBody": "d41d8cd98f00b204e9800998ecf8427e",
                    "eventSource": "aws:sqs",
                    "eventSourceARN": "arn:aws:sqs:us-east-1:123456789012:DataPipelineQueue",
                    "awsRegion": "us-east-1"
                })
            })
            .collect();
        serde_json::from_value(json!({ "Records": records })).unwrap()
    }

    #[test]
    fn test_created_keys_from_s3_notifications() {
        let event = sqs_event(&[
            s3_notification("population-data/population.json"),
            r#"{"Service":"Amazon S3","Event":"s3:TestEvent"}"#.to_string(),
        ]);

        assert_eq!(created_keys(&event), vec!["population-data/population.json"]);
    }

    #[tokio::test]
    async fn test_analyze_schema_error_before_reports() {
        let store = MemoryStore::with_objects([
            ("ts", "series_id\tyear\tperiod\tvalue\nX\t2015\tQ01\t1.0\n"),
            ("pop.json", r#"{"data": [{"Year": 2015, "Population": 1}]}"#),
        ]);
        let source = StoreSource::new(store, "ts", "pop.json");

        let err = analyze(&source, &ReportParams::default()).await.unwrap_err();
        assert_eq!(err.kind(), "SchemaError");
    }
}
