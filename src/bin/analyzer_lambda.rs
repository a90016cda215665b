//! Lambda handler for the SQS queue fed by population upload notifications.

use aws_lambda_events::event::sqs::SqsEvent;
use bls_pipeline::{
    analyzer::{analyze, created_keys},
    config::Config,
    data::StoreSource,
    output::log_reports,
    status::{StatusResponse, analyzer_status},
    store::S3Store,
    telemetry,
};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use tracing::{error, info};

struct Analyzer {
    config: Config,
    source: StoreSource<S3Store>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init_lambda()?;

    let config = Config::from_env()?;
    let store = S3Store::from_env(&config.bucket).await;
    let source = StoreSource::new(store, &config.timeseries_key, &config.population_key);
    let analyzer = Analyzer { config, source };
    let analyzer = &analyzer;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<SqsEvent>| async move {
        handler(analyzer, event).await
    }))
    .await
}

#[tracing::instrument(skip_all, fields(request_id = %event.context.request_id))]
async fn handler(analyzer: &Analyzer, event: LambdaEvent<SqsEvent>) -> Result<StatusResponse, Error> {
    let keys = created_keys(&event.payload);
    info!(messages = event.payload.records.len(), keys = ?keys, "Analysis triggered");

    let result = analyze(&analyzer.source, &analyzer.config.report).await;
    match &result {
        Ok(reports) => log_reports(reports),
        Err(e) => error!(kind = e.kind(), error = %e, "Analysis failed"),
    }

    Ok(analyzer_status(&result))
}
