//! Merge raw mint and verify measurements into one table.
//!
//! Raw measurement files are indexed 0-based by measurement order; the
//! merged table is indexed 1-based by token count.

use crate::table::{Gas, GasMeasurement, GasTable};
use crate::utils::error::GasError;
use log::{debug, warn};

/// Merge raw mint and verify gas columns
///
/// **Public** - first step of the gas pipeline
///
/// # Arguments
/// * `raw_gas_mint` - `gas_mint` column in measurement order
/// * `raw_gas_verify` - `gas_verify` column in measurement order
///
/// # Returns
/// Table with one row per mint measurement, row `i` stored at `n = i + 1`.
/// Verify cells past the end of `raw_gas_verify` are left absent.
///
/// # Errors
/// * `GasError::DimensionMismatch` - more verify rows than mint rows
pub fn merge_gas_mint_verify(
    raw_gas_mint: &[Option<Gas>],
    raw_gas_verify: &[Option<Gas>],
) -> Result<GasTable, GasError> {
    if raw_gas_verify.len() > raw_gas_mint.len() {
        return Err(GasError::DimensionMismatch {
            mint: raw_gas_mint.len(),
            verify: raw_gas_verify.len(),
        });
    }

    if raw_gas_verify.len() < raw_gas_mint.len() {
        debug!(
            "Verify measurements stop at n = {}; {} rows left for extension",
            raw_gas_verify.len(),
            raw_gas_mint.len() - raw_gas_verify.len()
        );
    }

    let missing_mint = raw_gas_mint.iter().filter(|g| g.is_none()).count();
    if missing_mint > 0 {
        warn!("{} mint measurements are empty", missing_mint);
    }

    let table: GasTable = raw_gas_mint
        .iter()
        .enumerate()
        .map(|(i, gas_mint)| {
            let gas_verify = raw_gas_verify.get(i).copied().flatten();
            (i as u64 + 1, GasMeasurement::new(*gas_mint, gas_verify))
        })
        .collect();

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_reindexes_from_one() {
        let table = merge_gas_mint_verify(&[Some(10), Some(20), Some(30)], &[None, Some(5), None]).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(1), Some(&GasMeasurement::new(Some(10), None)));
        assert_eq!(table.get(2), Some(&GasMeasurement::new(Some(20), Some(5))));
        assert_eq!(table.get(3), Some(&GasMeasurement::new(Some(30), None)));
        assert!(table.get(0).is_none());
    }

    #[test]
    fn test_shorter_verify_leaves_absent_tail() {
        let table = merge_gas_mint_verify(&[Some(10), Some(20), Some(30)], &[Some(4)]).unwrap();

        assert_eq!(table.gas_verify_at(1), Ok(4));
        assert!(table.get(2).unwrap().gas_verify.is_none());
        assert!(table.get(3).unwrap().gas_verify.is_none());
    }

    #[test]
    fn test_longer_verify_is_rejected() {
        let result = merge_gas_mint_verify(&[Some(10)], &[Some(4), Some(5)]);

        assert_eq!(result, Err(GasError::DimensionMismatch { mint: 1, verify: 2 }));
    }

    #[test]
    fn test_empty_inputs() {
        let table = merge_gas_mint_verify(&[], &[]).unwrap();
        assert!(table.is_empty());
    }
}
