//! Lambda handler for the daily collection schedule.

use bls_pipeline::{
    collector::run_collector,
    config::Config,
    fetch::{BasicClient, WithUserAgent},
    status::{StatusResponse, collector_status},
    store::S3Store,
    telemetry,
};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::info;

struct Collector {
    config: Config,
    client: WithUserAgent<BasicClient>,
    store: S3Store,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init_lambda()?;

    let config = Config::from_env()?;
    let client = WithUserAgent::new(BasicClient::new()?, &config.user_agent)?;
    let store = S3Store::from_env(&config.bucket).await;
    let collector = Collector {
        config,
        client,
        store,
    };
    let collector = &collector;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(collector, event).await
    }))
    .await
}

#[tracing::instrument(skip_all, fields(request_id = %event.context.request_id))]
async fn handler(collector: &Collector, event: LambdaEvent<Value>) -> Result<StatusResponse, Error> {
    // The schedule payload carries nothing the collector needs.
    let outcome = run_collector(&collector.client, &collector.store, &collector.config).await;
    let status = collector_status(&outcome);

    info!(status = status.status_code, body = %status.body, "Collector finished");
    Ok(status)
}
