//! Roll a collection transfer log up into periodic gas buckets.
//!
//! Every mint costs the mint gas at the new collection size; every transfer
//! that is neither a mint nor a burn costs the verify gas at the current
//! collection size. Burns are ignored.

use super::period::{format_ts, period_secs, round_ts};
use crate::table::{GasTable, PeriodBucket, Transfer};
use crate::utils::error::GasError;
use log::{debug, info};
use std::time::Duration;

/// Aggregate the gas spent by a collection per period
///
/// **Public** - main entry point for collection gas
///
/// # Arguments
/// * `gas` - Complete gas table (both columns filled for every token count)
/// * `transfers` - Transfer log in chronological order
/// * `period` - Width of each bucket
///
/// # Returns
/// One bucket per period that saw at least one transfer, in increasing
/// `ts` order. Running totals are never reset.
///
/// # Errors
/// * `GasError::InvalidInput` - empty log, first record not a mint,
///   out-of-order timestamps or an invalid period
/// * `GasError::MissingBucket` - the gas table does not cover the collection
pub fn derive_collection_gas(
    gas: &GasTable,
    transfers: &[Transfer],
    period: Duration,
) -> Result<Vec<PeriodBucket>, GasError> {
    let period_secs = period_secs(period)?;

    let Some((first, rest)) = transfers.split_first() else {
        return Err(GasError::InvalidInput("transfer log is empty".to_string()));
    };

    if !first.is_mint() {
        return Err(GasError::InvalidInput("first transfer must be a mint".to_string()));
    }

    let first_gas = gas.gas_mint_at(1)?;
    let mut row = PeriodBucket {
        ts: round_ts(first.timestamp, period_secs),
        num_tokens: 1,
        total_num_tokens: 1,
        gas_mint: first_gas,
        total_gas_mint: first_gas,
        ..Default::default()
    };

    debug!("First period starts at {}", format_ts(row.ts));

    let mut buckets = Vec::new();

    for (i, transfer) in rest.iter().enumerate() {
        let ts = round_ts(transfer.timestamp, period_secs);

        if ts < row.ts {
            return Err(GasError::InvalidInput(format!(
                "transfer {} at {} precedes the current period {}",
                i + 1,
                transfer.timestamp,
                row.ts
            )));
        }

        if ts != row.ts {
            buckets.push(row);
            row = row.next_period(ts);
        }

        if transfer.is_mint() {
            let gas = gas.gas_mint_at(row.total_num_tokens + 1)?;

            row.num_tokens += 1;
            row.total_num_tokens += 1;

            row.gas_mint += gas;
            row.total_gas_mint += gas;
        } else if !transfer.is_burn() {
            let gas = gas.gas_verify_at(row.total_num_tokens)?;

            row.num_transfers += 1;
            row.total_num_transfers += 1;

            row.gas_verify += gas;
            row.total_gas_verify += gas;
        }
    }

    buckets.push(row);

    info!("Aggregated {} transfers into {} periods ({} tokens, {} transfers)",
          transfers.len(),
          buckets.len(),
          row.total_num_tokens,
          row.total_num_transfers);

    Ok(buckets)
}
