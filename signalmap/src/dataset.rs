//! Location dataset loader.
//!
//! The dataset is a JSON array of [`LocationRecord`]s. It is loaded once when the widget starts and
//! either accepted as a whole or rejected as a whole: a single invalid record fails the load, so a
//! partially rendered list never appears.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use ahash::AHashSet;
use bytes::Bytes;

use crate::error::SignalMapError;
use crate::platform::PlatformService;
use crate::record::LocationRecord;

/// Where to load the dataset from.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// Fetch over the network.
    Url(String),
    /// Read from the local file system.
    #[cfg(not(target_arch = "wasm32"))]
    File(PathBuf),
    /// Already loaded content.
    Bytes(Bytes),
}

/// Validated set of location records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<LocationRecord>,
}

impl Dataset {
    /// Validates the records and wraps them into a dataset.
    ///
    /// Every record must have a non-empty code unique within the dataset and a valid position.
    pub fn new(records: Vec<LocationRecord>) -> Result<Self, SignalMapError> {
        let mut codes = AHashSet::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            if record.code.trim().is_empty() {
                return Err(SignalMapError::InvalidRecord {
                    index,
                    reason: "empty code".to_string(),
                });
            }

            if !codes.insert(record.code.as_str()) {
                return Err(SignalMapError::InvalidRecord {
                    index,
                    reason: format!("duplicate code {:?}", record.code),
                });
            }

            record
                .position
                .validate()
                .map_err(|err| SignalMapError::InvalidRecord {
                    index,
                    reason: err.to_string(),
                })?;
        }

        Ok(Self { records })
    }

    /// Records in dataset order.
    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the dataset returning the records.
    pub fn into_records(self) -> Vec<LocationRecord> {
        self.records
    }
}

/// Decodes and validates a dataset from its JSON representation.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, SignalMapError> {
    let records: Vec<LocationRecord> = serde_json::from_slice(bytes)?;
    Dataset::new(records)
}

/// Loads the dataset from the source.
pub async fn load_dataset(source: &DatasetSource) -> Result<Dataset, SignalMapError> {
    let bytes = match source {
        DatasetSource::Url(url) => crate::platform::instance().load_bytes_from_url(url).await?,
        #[cfg(not(target_arch = "wasm32"))]
        DatasetSource::File(path) => Bytes::from(tokio::fs::read(path).await?),
        DatasetSource::Bytes(bytes) => bytes.clone(),
    };

    let dataset = parse_dataset(&bytes)?;
    log::info!("Loaded dataset with {} locations", dataset.len());

    Ok(dataset)
}
