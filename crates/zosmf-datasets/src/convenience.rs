//! Convenience operations layered on [`DatasetManager`].

use crate::client::DatasetManager;
use crate::error::Result;
use crate::types::*;

/// Record length used by the default allocations.
const DEFAULT_RECORD_LENGTH: u32 = 256;

/// Block size used by the default allocations.
const DEFAULT_BLOCK_SIZE: u32 = 27920;

/// Directory blocks given to partitioned datasets when none are requested.
const DEFAULT_DIRECTORY_BLOCKS: u32 = 5;

impl DatasetManager {
    /// Allocate a sequential dataset: 10/5 tracks, variable records of 256.
    pub async fn create_sequential_dataset(&self, name: &str) -> Result<()> {
        let request = CreateDatasetRequest::new(
            name,
            DatasetType::Sequential,
            Space::new(10, 5, SpaceUnit::Tracks),
        )
        .record_format(RecordFormat::Variable)
        .record_length(DEFAULT_RECORD_LENGTH)
        .block_size(DEFAULT_BLOCK_SIZE);
        self.create_dataset(&request).await
    }

    /// Allocate a partitioned dataset: 10/5 tracks, 5 directory blocks,
    /// variable records of 256.
    pub async fn create_partitioned_dataset(&self, name: &str) -> Result<()> {
        let request = CreateDatasetRequest::new(
            name,
            DatasetType::Partitioned,
            Space::standard(SpaceUnit::Tracks),
        )
        .record_format(RecordFormat::Variable)
        .record_length(DEFAULT_RECORD_LENGTH)
        .block_size(DEFAULT_BLOCK_SIZE);
        self.create_dataset(&request).await
    }

    /// Allocate a dataset with explicit attributes. Partitioned datasets
    /// without directory blocks in `space` get 5.
    pub async fn create_dataset_with_options(
        &self,
        name: &str,
        dataset_type: DatasetType,
        space: Space,
        record_format: RecordFormat,
        record_length: u32,
        block_size: u32,
    ) -> Result<()> {
        let mut request = CreateDatasetRequest::new(name, dataset_type, space)
            .record_format(record_format)
            .record_length(record_length)
            .block_size(block_size);
        if dataset_type.is_partitioned() && space.directory == 0 {
            request = request.directory(DEFAULT_DIRECTORY_BLOCKS);
        }
        self.create_dataset(&request).await
    }

    /// Datasets under the high-level qualifier `owner`.
    pub async fn get_datasets_by_owner(&self, owner: &str, limit: Option<u32>) -> Result<DatasetList> {
        self.get_datasets_by_name(&format!("{}.*", owner), limit)
            .await
    }

    pub async fn get_datasets_by_name(&self, pattern: &str, limit: Option<u32>) -> Result<DatasetList> {
        let filter = DatasetFilter {
            dslevel: Some(pattern.to_string()),
            limit,
            ..Default::default()
        };
        self.list_datasets(&filter).await
    }

    /// The session user's datasets of one organization.
    ///
    /// The service cannot filter on organization, so the listing is narrowed
    /// here and `returned` reflects the narrowed count.
    pub async fn get_datasets_by_type(
        &self,
        dataset_type: DatasetType,
        limit: Option<u32>,
    ) -> Result<DatasetList> {
        let filter = DatasetFilter {
            limit,
            ..Default::default()
        };
        let mut list = self.list_datasets(&filter).await?;
        list.datasets
            .retain(|d| d.dataset_type() == Some(dataset_type));
        list.returned = list.datasets.len();
        Ok(list)
    }
}
