//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised by the gas derivation and aggregation procedures
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GasError {
    #[error("no value for index {index} in the {table} table")]
    MissingBucket { table: &'static str, index: u64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("verify table has {verify} rows but mint table only has {mint}")]
    DimensionMismatch { mint: usize, verify: usize },

    #[error("cannot extrapolate at index {index}: only {samples} prior value(s)")]
    InsufficientSamples { index: u64, samples: usize },
}

/// Errors that can occur while reading or writing tabular files
#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("invalid value '{value}' in column '{column}' at line {line}")]
    InvalidCell {
        column: String,
        value: String,
        line: u64,
    },

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading the pipeline configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no {kind} path configured for collection '{id}'")]
    MissingCollectionPath { id: String, kind: &'static str },
}
