//! Count mints and real transfers in a transfer log.

use crate::table::Transfer;
use serde::Serialize;

/// Mint and transfer totals of a transfer log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransferCounts {
    /// Records with `fromId == 0` and `toId != 0`
    pub mints: u64,

    /// Records with `fromId != 0` and `toId != 0`
    pub transfers: u64,
}

pub fn count_mints_transfers(transfers: &[Transfer]) -> TransferCounts {
    transfers
        .iter()
        .filter(|t| !t.is_burn())
        .fold(TransferCounts::default(), |mut counts, t| {
            if t.is_mint() {
                counts.mints += 1;
            } else {
                counts.transfers += 1;
            }
            counts
        })
}
