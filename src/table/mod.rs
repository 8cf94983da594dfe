//! Tabular artifacts: in-memory schema and CSV interchange.
//!
//! This module handles:
//! - Gas tables indexed by token count
//! - Sparse max-gas series keyed by MMR boundary
//! - Transfer logs and period buckets

pub mod csv_io;
pub mod schema;

// Re-export main types
pub use csv_io::{
    read_gas_series, read_gas_table, read_max_gas_table, read_period_buckets, read_raw_gas,
    read_transfers, validate_path, write_gas_table, write_max_gas_table, write_period_buckets,
};
pub use schema::{
    Gas, GasMeasurement, GasSeries, GasTable, MaxGasEntry, MaxGasTable, PeriodBucket, Transfer,
};
