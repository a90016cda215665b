use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};

use super::listing::parse_listing;
use crate::config::Config;
use crate::fetch::{HttpClient, fetch_bytes, fetch_text};
use crate::store::ObjectStore;

/// Counts reported by a BLS directory sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub synced_files_count: usize,
    pub deleted_files_count: usize,
}

/// Mirrors the BLS directory listing into `config.bls_prefix`.
///
/// Every listed file is downloaded and stored again, so changed files are
/// refreshed. Stored objects under the prefix whose name is no longer listed
/// are deleted afterwards. A failed download aborts the sync before anything
/// is deleted.
#[tracing::instrument(skip_all, fields(base_url = %config.bls_base_url, prefix = %config.bls_prefix))]
pub async fn sync_bls_files<C, S>(client: &C, store: &S, config: &Config) -> Result<SyncSummary>
where
    C: HttpClient,
    S: ObjectStore + ?Sized,
{
    let html = fetch_text(client, &config.bls_base_url).await?;
    let listed = parse_listing(&html, &config.bls_base_url)?;
    info!(files = listed.len(), "Directory listing parsed");

    let existing: HashSet<String> = store
        .list(&config.bls_prefix)
        .await?
        .into_iter()
        .filter_map(|key| key.strip_prefix(&config.bls_prefix).map(str::to_string))
        .collect();

    let mut synced = HashSet::new();
    for file in &listed {
        let body = fetch_bytes(client, &file.url)
            .await
            .with_context(|| format!("downloading {}", file.name))?;
        let key = format!("{}{}", config.bls_prefix, file.name);
        let len = body.len();
        store.put(&key, body).await?;

        info!(key = %key, bytes = len, new = !existing.contains(&file.name), "File synced");
        synced.insert(file.name.clone());
    }

    let mut stale: Vec<&String> = existing.difference(&synced).collect();
    stale.sort();
    for name in &stale {
        let key = format!("{}{}", config.bls_prefix, name);
        store.delete(&key).await?;
        warn!(key = %key, "Removed file no longer listed upstream");
    }

    let summary = SyncSummary {
        synced_files_count: synced.len(),
        deleted_files_count: stale.len(),
    };
    info!(
        synced = summary.synced_files_count,
        deleted = summary.deleted_files_count,
        "BLS sync complete"
    );
    Ok(summary)
}
