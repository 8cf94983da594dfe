//! YAML configuration of the full pipeline.
//!
//! ```yaml
//! data:
//!   gas:
//!     raw: { mint: raw/mint.csv, verify: raw/verify.csv, max_verify: raw/max_verify.csv }
//!     derived: { merged: out/merged.csv, max: out/max.csv, complete: out/complete.csv }
//!   collections:
//!     transfers: { azuki: raw/azuki.csv }
//!     gas: { azuki: out/azuki_gas.csv }
//! collections:
//!   - id: azuki
//!     aggregation_period: 1week
//! ```

use crate::utils::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub data: DataPaths,

    #[serde(default)]
    pub collections: Vec<CollectionConfig>,

    /// Overrides the collection size used for the max-gas series
    #[serde(default)]
    pub num_tokens: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPaths {
    pub gas: GasPaths,

    #[serde(default)]
    pub collections: CollectionPaths,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasPaths {
    pub raw: RawGasPaths,
    pub derived: DerivedGasPaths,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGasPaths {
    pub mint: PathBuf,
    pub verify: PathBuf,

    /// Helper table of measured worst-case verify gas around each `2^i`
    pub max_verify: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedGasPaths {
    pub merged: PathBuf,
    pub max: PathBuf,
    pub complete: PathBuf,
}

/// Per-collection input and output files, keyed by collection id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionPaths {
    #[serde(default)]
    pub transfers: BTreeMap<String, PathBuf>,

    #[serde(default)]
    pub gas: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Human readable period, e.g. `1week`
    #[serde(default = "default_period")]
    pub aggregation_period: String,
}

fn default_period() -> String {
    "1week".to_string()
}

impl CollectionConfig {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl PipelineConfig {
    /// Load the configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading pipeline config from: {}", path.display());

        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(raw)?;
        debug!("Config loaded: {} collection(s)", config.collections.len());
        Ok(config)
    }

    /// Transfer log of a collection
    pub fn transfers_path(&self, id: &str) -> Result<&Path, ConfigError> {
        self.data
            .collections
            .transfers
            .get(id)
            .map(PathBuf::as_path)
            .ok_or_else(|| ConfigError::MissingCollectionPath {
                id: id.to_string(),
                kind: "transfers",
            })
    }

    /// Output collection-gas table of a collection
    pub fn collection_gas_path(&self, id: &str) -> Result<&Path, ConfigError> {
        self.data
            .collections
            .gas
            .get(id)
            .map(PathBuf::as_path)
            .ok_or_else(|| ConfigError::MissingCollectionPath {
                id: id.to_string(),
                kind: "gas",
            })
    }
}
