// WasteDesk - app/dataset.rs
//
// Loads the record snapshot the dashboard works on: either the built-in
// sample data or a JSON dataset file. A file may omit any of the three
// arrays; omitted views fall back to the sample records.
// Records are validated once at load time and never re-read.

use crate::core::model::{CollectionRequest, Collector, Zone};
use crate::core::record::ListRecord;
use crate::core::sample;
use crate::util::constants;
use crate::util::error::DataError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// All records for one dashboard session.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub zones: Vec<Zone>,
    pub collectors: Vec<Collector>,
    pub requests: Vec<CollectionRequest>,
}

impl Dataset {
    /// The built-in demonstration records.
    pub fn sample() -> Self {
        Self {
            zones: sample::zones(),
            collectors: sample::collectors(),
            requests: sample::requests(),
        }
    }
}

/// Raw deserialisable shape of a dataset file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DatasetFile {
    zones: Option<Vec<Zone>>,
    collectors: Option<Vec<Collector>>,
    requests: Option<Vec<CollectionRequest>>,
}

/// Load a dataset from `path`, or the sample dataset when `path` is `None`.
pub fn load_or_sample(path: Option<&Path>) -> Result<Dataset, DataError> {
    match path {
        Some(path) => load_dataset(path),
        None => {
            tracing::debug!("No dataset file given; using built-in sample data");
            Ok(Dataset::sample())
        }
    }
}

/// Read, parse, and validate a JSON dataset file.
pub fn load_dataset(path: &Path) -> Result<Dataset, DataError> {
    let metadata = std::fs::metadata(path).map_err(|e| DataError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if metadata.len() > constants::MAX_DATASET_FILE_SIZE {
        return Err(DataError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_DATASET_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| DataError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let dataset = parse_dataset(&content, path)?;
    tracing::info!(
        path = %path.display(),
        zones = dataset.zones.len(),
        collectors = dataset.collectors.len(),
        requests = dataset.requests.len(),
        "Loaded dataset"
    );
    Ok(dataset)
}

/// Parse and validate dataset JSON. `path` is only used for error context.
pub fn parse_dataset(content: &str, path: &Path) -> Result<Dataset, DataError> {
    let raw: DatasetFile = serde_json::from_str(content).map_err(|e| DataError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;

    let dataset = Dataset {
        zones: raw.zones.unwrap_or_else(sample::zones),
        collectors: raw.collectors.unwrap_or_else(sample::collectors),
        requests: raw.requests.unwrap_or_else(sample::requests),
    };

    validate_records(&dataset.zones)?;
    validate_records(&dataset.collectors)?;
    validate_records(&dataset.requests)?;
    Ok(dataset)
}

/// Enforce the per-view record cap, unique ids, and field constraints.
fn validate_records<R: ListRecord>(records: &[R]) -> Result<(), DataError> {
    let view = R::VIEW.label();
    if records.len() > constants::MAX_RECORDS_PER_VIEW {
        return Err(DataError::TooManyRecords {
            view,
            count: records.len(),
            max: constants::MAX_RECORDS_PER_VIEW,
        });
    }

    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        let id = record.id();
        if let Err(issue) = record.validate() {
            return Err(DataError::InvalidRecord { view, id, issue });
        }
        if !seen.insert(id.clone()) {
            return Err(DataError::DuplicateId { view, id });
        }
    }
    Ok(())
}
