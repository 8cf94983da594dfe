//! Gas table derivation for mint and verify.
//!
//! This module transforms raw measurements into:
//! - A merged table indexed by token count
//! - Worst-case mint/verify gas per MMR height
//! - A complete table with verify gas extended to every token count

pub mod extend;
pub mod max_gas;
pub mod merge;

// Re-export main functions
pub use extend::{extend_gas, gas_limit_index};
pub use max_gas::{derive_max_gas_mint, derive_max_gas_verify, mmr_height};
pub use merge::merge_gas_mint_verify;
