//! Per-collection gas over time.
//!
//! This module turns an NFT transfer log into:
//! - Periodic buckets of minted tokens, transfers and their gas
//! - Simple mint/transfer counts

pub mod aggregate;
pub mod count;
pub mod period;

// Re-export main types and functions
pub use aggregate::derive_collection_gas;
pub use count::{count_mints_transfers, TransferCounts};
pub use period::{format_ts, parse_period, period_secs, round_ts};
