//! Configuration and constants for the CLI.

use std::time::Duration;

/// Current schema version of the tabular artifacts
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default pipeline configuration file
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Default aggregation period (one week)
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(7 * 24 * 60 * 60);

// Shift applied before flooring to a period so weekly buckets start on the
// same weekday/hour for every dataset: 3 days + 1 hour
pub const PERIOD_ANCHOR_OFFSET_SECS: i64 = 3 * 24 * 60 * 60 + 60 * 60;

// Column names shared by the readers and writers
pub const COL_GAS_MINT: &str = "gas_mint";
pub const COL_GAS_VERIFY: &str = "gas_verify";
pub const COL_MAX_GAS_MINT: &str = "max_gas_mint";
pub const COL_MAX_GAS_VERIFY: &str = "max_gas_verify";
