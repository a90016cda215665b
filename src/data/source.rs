use std::path::{Path, PathBuf};
use tracing::info;

use super::{PopulationRecord, TimeSeriesRecord, parse_population, parse_timeseries};
use crate::error::PipelineError;
use crate::store::ObjectStore;

/// Provider of the two input tables.
#[async_trait::async_trait]
pub trait TabularSource: Send + Sync {
    async fn load_timeseries(&self) -> Result<Vec<TimeSeriesRecord>, PipelineError>;
    async fn load_population(&self) -> Result<Vec<PopulationRecord>, PipelineError>;
}

/// Reads both tables from fixed keys of an [`ObjectStore`].
pub struct StoreSource<S> {
    store: S,
    timeseries_key: String,
    population_key: String,
}

impl<S: ObjectStore> StoreSource<S> {
    pub fn new(store: S, timeseries_key: &str, population_key: &str) -> Self {
        Self {
            store,
            timeseries_key: timeseries_key.to_string(),
            population_key: population_key.to_string(),
        }
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>, PipelineError> {
        self.store
            .get(key)
            .await
            .map_err(|e| PipelineError::source_unavailable(key, format!("{e:#}")))
    }
}

#[async_trait::async_trait]
impl<S: ObjectStore> TabularSource for StoreSource<S> {
    #[tracing::instrument(skip(self), fields(key = %self.timeseries_key))]
    async fn load_timeseries(&self) -> Result<Vec<TimeSeriesRecord>, PipelineError> {
        let bytes = self.read(&self.timeseries_key).await?;
        let rows = parse_timeseries(&bytes)?;
        info!(rows = rows.len(), "Loaded time-series table");
        Ok(rows)
    }

    #[tracing::instrument(skip(self), fields(key = %self.population_key))]
    async fn load_population(&self) -> Result<Vec<PopulationRecord>, PipelineError> {
        let bytes = self.read(&self.population_key).await?;
        let rows = parse_population(&bytes)?;
        info!(rows = rows.len(), "Loaded population table");
        Ok(rows)
    }
}

/// Reads both tables from local files, for running the analysis offline.
pub struct LocalFiles {
    pub timeseries: PathBuf,
    pub population: PathBuf,
}

impl LocalFiles {
    async fn read(path: &Path) -> Result<Vec<u8>, PipelineError> {
        tokio::fs::read(path)
            .await
            .map_err(|e| PipelineError::source_unavailable(&path.display().to_string(), e))
    }
}

#[async_trait::async_trait]
impl TabularSource for LocalFiles {
    async fn load_timeseries(&self) -> Result<Vec<TimeSeriesRecord>, PipelineError> {
        parse_timeseries(&Self::read(&self.timeseries).await?)
    }

    async fn load_population(&self) -> Result<Vec<PopulationRecord>, PipelineError> {
        parse_population(&Self::read(&self.population).await?)
    }
}
