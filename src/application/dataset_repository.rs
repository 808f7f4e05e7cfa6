// Repository trait for A/B test dataset access
use crate::domain::variation::ChartDataset;
use async_trait::async_trait;

#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Load the complete dataset. Called once at startup.
    async fn load_dataset(&self) -> anyhow::Result<ChartDataset>;
}
