use crate::utils::config::{DEFAULT_CONFIG_FILE, DEFAULT_PERIOD};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the merge-gas command
#[derive(Debug, Clone)]
pub struct MergeGasArgs {
    /// Raw mint measurements (`gas_mint` column)
    pub raw_mint: PathBuf,

    /// Raw verify measurements (`gas_verify` column)
    pub raw_verify: PathBuf,

    /// Output merged gas table
    pub output: PathBuf,
}

/// Arguments for the max-gas command
#[derive(Debug, Clone)]
pub struct MaxGasArgs {
    /// Merged gas table
    pub merged: PathBuf,

    /// Helper table with measured worst-case verify gas
    pub helper_max_verify: PathBuf,

    /// Output max gas table
    pub output: PathBuf,

    /// Collection size to cover (None = largest index of the merged table)
    pub num_tokens: Option<u64>,
}

/// Arguments for the extend-gas command
#[derive(Debug, Clone)]
pub struct ExtendGasArgs {
    /// Merged gas table
    pub merged: PathBuf,

    /// Max gas table produced by max-gas
    pub max_gas: PathBuf,

    /// Output complete gas table
    pub output: PathBuf,
}

/// Arguments for the collection-gas command
///
/// **Public** - used by main.rs and the make command
#[derive(Debug, Clone)]
pub struct CollectionGasArgs {
    /// Complete gas table
    pub gas: PathBuf,

    /// Transfer log of the collection
    pub transfers: PathBuf,

    /// Output collection gas table
    pub output: PathBuf,

    /// Aggregation period
    pub period: Duration,

    /// Print the periods to stdout
    pub print_summary: bool,
}

impl Default for CollectionGasArgs {
    fn default() -> Self {
        Self {
            gas: PathBuf::from("complete.csv"),
            transfers: PathBuf::from("transfers.csv"),
            output: PathBuf::from("collection_gas.csv"),
            period: DEFAULT_PERIOD,
            print_summary: false,
        }
    }
}

/// Steps executed by the make command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MakeSteps {
    #[default]
    All,
    Gas,
    Collections,
}

impl MakeSteps {
    pub fn includes_gas(&self) -> bool {
        matches!(self, MakeSteps::All | MakeSteps::Gas)
    }

    pub fn includes_collections(&self) -> bool {
        matches!(self, MakeSteps::All | MakeSteps::Collections)
    }
}

/// Arguments for the make command
#[derive(Debug, Clone)]
pub struct MakeArgs {
    /// Pipeline configuration file
    pub config: PathBuf,

    pub steps: MakeSteps,
}

impl Default for MakeArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            steps: MakeSteps::All,
        }
    }
}
