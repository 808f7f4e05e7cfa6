// JSON file repository implementation
use crate::application::dataset_repository::DatasetRepository;
use crate::domain::variation::ChartDataset;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse a dataset document. Negative or fractional counts and malformed
/// dates are rejected; suspicious but well-typed data is only logged.
pub fn parse_dataset(json: &str) -> Result<ChartDataset, DatasetError> {
    let dataset: ChartDataset = serde_json::from_str(json)?;
    inspect(&dataset);
    Ok(dataset)
}

fn inspect(dataset: &ChartDataset) {
    let mut seen = HashSet::new();
    for id in dataset.variation_ids() {
        if !seen.insert(id.clone()) {
            tracing::warn!("Duplicate variation id {} in dataset", id);
        }
    }

    for pair in dataset.data.windows(2) {
        if pair[1].date < pair[0].date {
            tracing::warn!(
                "Data points out of chronological order: {} after {}",
                pair[1].date,
                pair[0].date
            );
            break;
        }
    }

    for point in &dataset.data {
        for (id, conversions) in &point.conversions {
            let visits = point.visits_for(id);
            if *conversions > visits {
                tracing::warn!(
                    "Variation {} has {} conversions for {} visits on {}",
                    id,
                    conversions,
                    visits,
                    point.date
                );
            }
        }
    }
}

#[async_trait]
impl DatasetRepository for JsonFileRepository {
    async fn load_dataset(&self) -> anyhow::Result<ChartDataset> {
        tracing::debug!("Reading dataset from {}", self.path.display());
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| DatasetError::Io {
                path: self.path.clone(),
                source,
            })?;

        Ok(parse_dataset(&json)?)
    }
}
