//! MMR Gas Analysis
//!
//! Worst-case gas extrapolation for NFT mint/verify operations backed by a
//! Merkle Mountain Range, and per-collection gas consumption over time.
//!
//! This crate provides the core implementation for the `mmr-gas` CLI tool.
//!
//! ## Pipeline
//!
//! 1. [`gas::merge_gas_mint_verify`] - raw measurements to a table indexed by token count
//! 2. [`gas::derive_max_gas_mint`] / [`gas::derive_max_gas_verify`] - worst case per MMR height
//! 3. [`gas::extend_gas`] - fill unmeasured verify gas with its bucket's worst case
//! 4. [`collection::derive_collection_gas`] - periodic gas of a collection's transfer log
//!
//! ```bash
//! mmr-gas make --config config.yml
//! mmr-gas --help
//! ```

pub mod collection;
pub mod commands;
pub mod gas;
pub mod pipeline;
pub mod table;
pub mod utils;
