//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod collection;
pub mod gas;
pub mod make;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use collection::{execute_collection_gas, execute_count_transfers, validate_args};
pub use gas::{execute_extend_gas, execute_max_gas, execute_merge_gas, validate_output};
pub use make::execute_make;
pub use models::{CollectionGasArgs, ExtendGasArgs, MakeArgs, MakeSteps, MaxGasArgs, MergeGasArgs};
pub use utils::{display_schema, display_version};
