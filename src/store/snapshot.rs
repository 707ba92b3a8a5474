//! Dataset snapshot loading.
//!
//! The snapshot is a JSON document keyed by company id:
//!
//! ```json
//! { "companies": { "acme": { "id": "acme", "name": "Acme", "location": "NYC",
//!     "computerModels": { "m1": { "id": "m1", "name": "X1", "release": "2020" } } } } }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::model::{ComputerModel, NewCompany};
use crate::store::store::{ResourceStore, StoreError};

/// Errors raised while loading a dataset snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid dataset: {0}")]
    Store(#[from] StoreError),
}

/// On-disk representation of the whole dataset.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Snapshot {
    #[serde(default)]
    pub companies: IndexMap<String, SnapshotCompany>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCompany {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub computer_models: IndexMap<String, ComputerModel>,
}

impl ResourceStore {
    /// Build a store from a snapshot. Entities are indexed by their own `id`.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, StoreError> {
        let mut store = ResourceStore::new();
        for (key, company) in snapshot.companies {
            if key != company.id {
                tracing::warn!(key = %key, company_id = %company.id, "Dataset key differs from company id");
            }
            store.add_company(NewCompany {
                id: company.id,
                name: company.name,
                location: company.location,
                computer_models: company.computer_models.into_values().collect(),
            })?;
        }
        Ok(store)
    }
}

/// Load a dataset file and build the store from it.
pub fn load_snapshot(path: &Path) -> Result<ResourceStore, SnapshotError> {
    let file = File::open(path)?;
    let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))?;
    let store = ResourceStore::from_snapshot(snapshot)?;

    tracing::info!(path = ?path, companies = store.len(), "Loaded dataset");
    Ok(store)
}
