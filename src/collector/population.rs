use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::fetch::{HttpClient, fetch_bytes};
use crate::store::ObjectStore;

/// Fetches the population API payload and stores it at `config.population_key`.
///
/// The body must be valid JSON and is stored byte-for-byte as received.
/// Returns the number of bytes stored.
#[tracing::instrument(skip_all, fields(url = %config.population_url, key = %config.population_key))]
pub async fn store_population<C, S>(client: &C, store: &S, config: &Config) -> Result<usize>
where
    C: HttpClient,
    S: ObjectStore + ?Sized,
{
    let raw = fetch_bytes(client, &config.population_url).await?;
    serde_json::from_slice::<serde::de::IgnoredAny>(&raw)
        .context("population API returned invalid JSON")?;
    let len = raw.len();

    store.put(&config.population_key, raw).await?;
    info!(bytes = len, "Uploaded population data");
    Ok(len)
}
