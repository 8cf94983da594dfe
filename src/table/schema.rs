//! In-memory schema of the tabular artifacts.
//!
//! Indexed tables keep their index labels (token count, MMR boundary key)
//! in a `BTreeMap` so that lookups and windows are label based and always
//! iterate in ascending order.

use crate::utils::error::GasError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Gas amount. Signed so extrapolation deltas may be negative.
pub type Gas = i64;

/// One row of the merged gas table, keyed by token count `n`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasMeasurement {
    pub gas_mint: Option<Gas>,
    pub gas_verify: Option<Gas>,
}

impl GasMeasurement {
    pub fn new(gas_mint: Option<Gas>, gas_verify: Option<Gas>) -> Self {
        Self { gas_mint, gas_verify }
    }
}

/// Merged (or complete) gas table indexed 1-based by token count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GasTable {
    rows: BTreeMap<u64, GasMeasurement>,
}

impl GasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, n: u64, row: GasMeasurement) {
        self.rows.insert(n, row);
    }

    pub fn get(&self, n: u64) -> Option<&GasMeasurement> {
        self.rows.get(&n)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest index label, `None` for an empty table
    pub fn max_index(&self) -> Option<u64> {
        self.rows.keys().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &GasMeasurement)> {
        self.rows.iter().map(|(n, row)| (*n, row))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&u64, &mut GasMeasurement)> {
        self.rows.iter_mut()
    }

    /// Mint gas at index `n`, failing if the row or the cell is absent
    pub fn gas_mint_at(&self, n: u64) -> Result<Gas, GasError> {
        self.get(n)
            .and_then(|row| row.gas_mint)
            .ok_or(GasError::MissingBucket { table: "gas_mint", index: n })
    }

    /// Verify gas at index `n`, failing if the row or the cell is absent
    pub fn gas_verify_at(&self, n: u64) -> Result<Gas, GasError> {
        self.get(n)
            .and_then(|row| row.gas_verify)
            .ok_or(GasError::MissingBucket { table: "gas_verify", index: n })
    }

    /// Maximum present `gas_mint` whose label falls in `window`
    pub fn max_gas_mint_in(&self, window: RangeInclusive<u64>) -> Option<Gas> {
        self.rows.range(window).filter_map(|(_, row)| row.gas_mint).max()
    }
}

impl FromIterator<(u64, GasMeasurement)> for GasTable {
    fn from_iter<I: IntoIterator<Item = (u64, GasMeasurement)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Sparse single-column series of gas values keyed by an index label.
///
/// Used for the helper max-verify table and for the derived max-gas series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GasSeries {
    values: BTreeMap<u64, Gas>,
}

impl GasSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: u64, gas: Gas) {
        self.values.insert(index, gas);
    }

    pub fn get(&self, index: u64) -> Option<Gas> {
        self.values.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max_index(&self) -> Option<u64> {
        self.values.keys().next_back().copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.values.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = Gas> + '_ {
        self.values.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, Gas)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// Maximum value whose label falls in `window`
    pub fn max_in(&self, window: RangeInclusive<u64>) -> Option<Gas> {
        self.values.range(window).map(|(_, gas)| *gas).max()
    }
}

impl FromIterator<(u64, Gas)> for GasSeries {
    fn from_iter<I: IntoIterator<Item = (u64, Gas)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// One row of the max-gas table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxGasEntry {
    pub max_gas_mint: Option<Gas>,
    pub max_gas_verify: Option<Gas>,
}

/// Outer join of the max mint series (keys `2^i+1`) and the max verify
/// series (keys `2^i-1`), sorted by key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaxGasTable {
    rows: BTreeMap<u64, MaxGasEntry>,
}

impl MaxGasTable {
    pub fn from_series(max_gas_mint: &GasSeries, max_gas_verify: &GasSeries) -> Self {
        let mut rows: BTreeMap<u64, MaxGasEntry> = BTreeMap::new();

        for (index, gas) in max_gas_mint.iter() {
            rows.entry(index).or_default().max_gas_mint = Some(gas);
        }
        for (index, gas) in max_gas_verify.iter() {
            rows.entry(index).or_default().max_gas_verify = Some(gas);
        }

        Self { rows }
    }

    pub fn insert(&mut self, index: u64, entry: MaxGasEntry) {
        self.rows.insert(index, entry);
    }

    pub fn get(&self, index: u64) -> Option<&MaxGasEntry> {
        self.rows.get(&index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &MaxGasEntry)> {
        self.rows.iter().map(|(k, v)| (*k, v))
    }

    /// The `max_gas_verify` column, skipping rows that only carry mint data
    pub fn verify_series(&self) -> GasSeries {
        self.rows
            .iter()
            .filter_map(|(index, entry)| entry.max_gas_verify.map(|gas| (*index, gas)))
            .collect()
    }

    /// The `max_gas_mint` column, skipping rows that only carry verify data
    pub fn mint_series(&self) -> GasSeries {
        self.rows
            .iter()
            .filter_map(|(index, entry)| entry.max_gas_mint.map(|gas| (*index, gas)))
            .collect()
    }
}

/// A record of the collection transfer log.
///
/// `from_id == 0` is a mint, `to_id == 0` a burn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    #[serde(rename = "fromId")]
    pub from_id: u64,

    #[serde(rename = "toId")]
    pub to_id: u64,

    /// Unix seconds
    pub timestamp: i64,
}

impl Transfer {
    pub fn new(from_id: u64, to_id: u64, timestamp: i64) -> Self {
        Self { from_id, to_id, timestamp }
    }

    pub fn is_mint(&self) -> bool {
        self.from_id == 0
    }

    pub fn is_burn(&self) -> bool {
        self.to_id == 0
    }
}

/// Activity and gas of one aggregation period, plus running totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBucket {
    /// Period start, Unix seconds
    pub ts: i64,

    /// Tokens minted in this period
    pub num_tokens: u64,

    /// Non-mint, non-burn transfers in this period
    pub num_transfers: u64,

    pub total_num_tokens: u64,
    pub total_num_transfers: u64,

    pub gas_mint: Gas,
    pub gas_verify: Gas,

    pub total_gas_mint: Gas,
    pub total_gas_verify: Gas,
}

impl PeriodBucket {
    /// Start a new period at `ts`, carrying every running total forward
    pub fn next_period(&self, ts: i64) -> Self {
        Self {
            ts,
            num_tokens: 0,
            num_transfers: 0,
            gas_mint: 0,
            gas_verify: 0,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> GasTable {
        (1..=5)
            .map(|n| (n, GasMeasurement::new(Some(n as Gas * 10), None)))
            .collect()
    }

    #[test]
    fn test_gas_table_lookups() {
        let table = sample_table();

        assert_eq!(table.len(), 5);
        assert_eq!(table.max_index(), Some(5));
        assert_eq!(table.gas_mint_at(3), Ok(30));
        assert_eq!(
            table.gas_verify_at(3),
            Err(GasError::MissingBucket { table: "gas_verify", index: 3 })
        );
        assert!(table.gas_mint_at(9).is_err());
    }

    #[test]
    fn test_window_max_clips_to_range() {
        let table = sample_table();

        assert_eq!(table.max_gas_mint_in(3..=5), Some(50));
        assert_eq!(table.max_gas_mint_in(4..=8), Some(50));
        assert_eq!(table.max_gas_mint_in(7..=9), None);
    }

    #[test]
    fn test_max_gas_table_outer_join() {
        let mint: GasSeries = [(3, 100), (5, 150)].into_iter().collect();
        let verify: GasSeries = [(1, 10), (3, 20)].into_iter().collect();

        let table = MaxGasTable::from_series(&mint, &verify);
        let keys: Vec<u64> = table.iter().map(|(k, _)| k).collect();

        assert_eq!(keys, vec![1, 3, 5]);
        assert_eq!(
            table.get(3),
            Some(&MaxGasEntry { max_gas_mint: Some(100), max_gas_verify: Some(20) })
        );
        assert_eq!(table.verify_series(), verify);
        assert_eq!(table.mint_series(), mint);
    }

    #[test]
    fn test_next_period_resets_only_period_counters() {
        let bucket = PeriodBucket {
            ts: 0,
            num_tokens: 2,
            num_transfers: 1,
            total_num_tokens: 5,
            total_num_transfers: 3,
            gas_mint: 20,
            gas_verify: 7,
            total_gas_mint: 50,
            total_gas_verify: 21,
        };

        let next = bucket.next_period(604_800);

        assert_eq!(next.ts, 604_800);
        assert_eq!((next.num_tokens, next.num_transfers), (0, 0));
        assert_eq!((next.gas_mint, next.gas_verify), (0, 0));
        assert_eq!(next.total_num_tokens, 5);
        assert_eq!(next.total_gas_verify, 21);
    }
}
