//! Scheduled collection: mirror the BLS directory and archive the
//! population API response into object storage.

mod listing;
mod population;
mod sync;

pub use listing::{ListedFile, parse_listing};
pub use population::store_population;
pub use sync::{SyncSummary, sync_bls_files};

use tracing::error;

use crate::config::Config;
use crate::fetch::HttpClient;
use crate::store::ObjectStore;

/// Result of one collector run. Each step is attempted regardless of the other.
#[derive(Debug)]
pub struct CollectorOutcome {
    pub bls_sync: anyhow::Result<SyncSummary>,
    pub population: anyhow::Result<usize>,
}

impl CollectorOutcome {
    pub fn is_success(&self) -> bool {
        self.bls_sync.is_ok() && self.population.is_ok()
    }
}

/// Runs the BLS sync and the population upload.
pub async fn run_collector<C, S>(client: &C, store: &S, config: &Config) -> CollectorOutcome
where
    C: HttpClient,
    S: ObjectStore + ?Sized,
{
    let bls_sync = sync_bls_files(client, store, config).await;
    if let Err(e) = &bls_sync {
        error!(error = %format!("{e:#}"), "BLS sync failed");
    }

    let population = store_population(client, store, config).await;
    if let Err(e) = &population {
        error!(error = %format!("{e:#}"), "Population data fetch/upload failed");
    }

    CollectorOutcome {
        bls_sync,
        population,
    }
}
