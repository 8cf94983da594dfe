//! Worst-case gas at each MMR height.
//!
//! Mint and verify cost jump when the token count crosses a power of two
//! (peaks of the mountain range merge). For every height `i` we sample the
//! three values bracketing `2^i` and keep the maximum. Past the measured
//! range the series is continued linearly with the mean step of the values
//! derived so far.

use crate::table::{Gas, GasSeries, GasTable};
use crate::utils::error::GasError;
use log::{debug, info};

/// Largest supported collection size; keeps `2^i + 1` inside `u64`
pub const MAX_NUM_TOKENS: u64 = 1 << 62;

/// Derive the max mint gas at keys `2^i + 1`, `i = 1..=ceil(log2(num_tokens))`
///
/// **Public** - main entry point for mint bounds
///
/// # Arguments
/// * `gas` - Merged gas table (reads `gas_mint`)
/// * `num_tokens` - Collection size the series must cover
///
/// # Returns
/// Sparse series, empty when `num_tokens < 2`
///
/// # Algorithm
/// 1. `i = 1`: the value at index 3
/// 2. While `2^i + 1` is inside the table: max over `[2^i - 1, 2^i + 1]`
/// 3. Afterwards: previous value + mean step (computed once)
///
/// # Errors
/// * `GasError::MissingBucket` - index 3 or a whole window has no mint value
/// * `GasError::InsufficientSamples` - extrapolation needed with < 2 values
pub fn derive_max_gas_mint(gas: &GasTable, num_tokens: u64) -> Result<GasSeries, GasError> {
    let height = mmr_height(num_tokens)?;
    let max_index = gas.max_index().unwrap_or(0);

    debug!("Deriving max mint gas for {} tokens (height {}, measured up to {})",
           num_tokens, height, max_index);

    let mut series = GasSeries::new();
    let mut mean: Option<Gas> = None;
    let mut last: Gas = 0;

    for i in 1..=height {
        let boundary = 1u64 << i;
        let key = boundary + 1;

        last = if i == 1 {
            gas.gas_mint_at(key)?
        } else if key <= max_index {
            gas.max_gas_mint_in(boundary - 1..=boundary + 1)
                .ok_or(GasError::MissingBucket { table: "gas_mint", index: key })?
        } else {
            last + extrapolation_step(&series, &mut mean, key)?
        };

        series.insert(key, last);
    }

    Ok(series)
}

/// Derive the max verify gas at keys `2^i - 1`, `i = 1..=ceil(log2(num_tokens))`
///
/// **Public** - main entry point for verify bounds
///
/// # Arguments
/// * `helper` - Measured worst-case verify samples around each `2^i`
/// * `num_tokens` - Collection size the series must cover
///
/// # Returns
/// Sparse series, empty when `num_tokens < 2`
///
/// # Errors
/// * `GasError::MissingBucket` - a window inside the helper range is empty
/// * `GasError::InsufficientSamples` - extrapolation needed with < 2 values
pub fn derive_max_gas_verify(helper: &GasSeries, num_tokens: u64) -> Result<GasSeries, GasError> {
    let height = mmr_height(num_tokens)?;
    let max_index = helper.max_index().unwrap_or(0);

    debug!("Deriving max verify gas for {} tokens (height {}, helper up to {})",
           num_tokens, height, max_index);

    let mut series = GasSeries::new();
    let mut mean: Option<Gas> = None;
    let mut last: Gas = 0;

    for i in 1..=height {
        let boundary = 1u64 << i;
        let key = boundary - 1;

        last = if boundary + 1 <= max_index {
            helper.max_in(boundary - 1..=boundary + 1)
                .ok_or(GasError::MissingBucket { table: "max_gas_verify helper", index: key })?
        } else {
            last + extrapolation_step(&series, &mut mean, key)?
        };

        series.insert(key, last);
    }

    Ok(series)
}

/// `ceil(log2(num_tokens))`, zero below two tokens
pub fn mmr_height(num_tokens: u64) -> Result<u32, GasError> {
    if num_tokens > MAX_NUM_TOKENS {
        return Err(GasError::InvalidInput(format!(
            "num_tokens {} exceeds the supported maximum {}",
            num_tokens, MAX_NUM_TOKENS
        )));
    }

    Ok(if num_tokens < 2 {
        0
    } else {
        u64::BITS - (num_tokens - 1).leading_zeros()
    })
}

/// Mean step used for extrapolation, computed on first use and then reused
fn extrapolation_step(series: &GasSeries, mean: &mut Option<Gas>, index: u64) -> Result<Gas, GasError> {
    if let Some(step) = *mean {
        return Ok(step);
    }

    let step = mean_delta(series, index)?;
    info!("Measured range exhausted at index {}; extrapolating with mean step {}", index, step);
    *mean = Some(step);

    Ok(step)
}

/// Mean of consecutive differences, truncated toward zero
fn mean_delta(series: &GasSeries, index: u64) -> Result<Gas, GasError> {
    let values: Vec<Gas> = series.values().collect();
    if values.len() < 2 {
        return Err(GasError::InsufficientSamples { index, samples: values.len() });
    }

    let total: Gas = values.windows(2).map(|w| w[1] - w[0]).sum();
    Ok(total / (values.len() as Gas - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::GasMeasurement;
    use pretty_assertions::assert_eq;

    fn mint_table(values: &[Gas]) -> GasTable {
        values
            .iter()
            .enumerate()
            .map(|(i, gas)| (i as u64 + 1, GasMeasurement::new(Some(*gas), None)))
            .collect()
    }

    fn pairs(series: &GasSeries) -> Vec<(u64, Gas)> {
        series.iter().collect()
    }

    #[test]
    fn test_mmr_height() {
        assert_eq!(mmr_height(0), Ok(0));
        assert_eq!(mmr_height(1), Ok(0));
        assert_eq!(mmr_height(2), Ok(1));
        assert_eq!(mmr_height(3), Ok(2));
        assert_eq!(mmr_height(4), Ok(2));
        assert_eq!(mmr_height(5), Ok(3));
        assert_eq!(mmr_height(1024), Ok(10));
        assert!(mmr_height(u64::MAX).is_err());
    }

    #[test]
    fn test_mint_measured_windows() {
        // n = 1..=10, gas = 10 * n, with a spike just below 2^3
        let mut values: Vec<Gas> = (1..=10).map(|n| n * 10).collect();
        values[6] = 500;
        let table = mint_table(&values);

        let series = derive_max_gas_mint(&table, 8).unwrap();

        assert_eq!(pairs(&series), vec![(3, 30), (5, 50), (9, 500)]);
    }

    #[test]
    fn test_mint_extrapolates_with_fixed_mean() {
        let table = mint_table(&(1..=10).map(|n| n * 10).collect::<Vec<_>>());

        let series = derive_max_gas_mint(&table, 40).unwrap();

        // measured 30, 50, 90 -> mean step (20 + 40) / 2 = 30
        assert_eq!(
            pairs(&series),
            vec![(3, 30), (5, 50), (9, 90), (17, 120), (33, 150), (65, 180)]
        );
    }

    #[test]
    fn test_mean_truncates_toward_zero() {
        let table = mint_table(&[1, 2, 10, 12, 15, 15, 18, 20, 21]);

        let series = derive_max_gas_mint(&table, 16).unwrap();

        // 10, 15, 21 -> (5 + 6) / 2 = 5
        assert_eq!(series.get(17), Some(26));
    }

    #[test]
    fn test_power_of_two_num_tokens() {
        let table = mint_table(&(1..=10).map(|n| n * 10).collect::<Vec<_>>());

        let series = derive_max_gas_mint(&table, 4).unwrap();

        assert_eq!(series.keys().collect::<Vec<_>>(), vec![3, 5]);
    }

    #[test]
    fn test_fewer_than_two_tokens_is_empty() {
        let table = mint_table(&[10, 20, 30]);
        let helper: GasSeries = [(1, 5), (2, 6), (3, 7)].into_iter().collect();

        assert!(derive_max_gas_mint(&table, 0).unwrap().is_empty());
        assert!(derive_max_gas_mint(&table, 1).unwrap().is_empty());
        assert!(derive_max_gas_verify(&helper, 1).unwrap().is_empty());
    }

    #[test]
    fn test_mint_missing_seed() {
        let table = mint_table(&[10, 20]);

        assert_eq!(
            derive_max_gas_mint(&table, 4),
            Err(GasError::MissingBucket { table: "gas_mint", index: 3 })
        );
    }

    #[test]
    fn test_mint_single_sample_cannot_extrapolate() {
        let table = mint_table(&[10, 20, 30]);

        assert_eq!(
            derive_max_gas_mint(&table, 8),
            Err(GasError::InsufficientSamples { index: 5, samples: 1 })
        );
    }

    #[test]
    fn test_verify_windows_then_extrapolation() {
        let helper: GasSeries = [
            (1, 100),
            (2, 110),
            (3, 120),
            (4, 150),
            (5, 140),
            (7, 200),
            (8, 210),
            (9, 205),
        ]
        .into_iter()
        .collect();

        let series = derive_max_gas_verify(&helper, 16).unwrap();

        // 120, 150, 210 -> mean step 45
        assert_eq!(pairs(&series), vec![(1, 120), (3, 150), (7, 210), (15, 255)]);
    }

    #[test]
    fn test_verify_decreasing_mean() {
        let helper: GasSeries = [(1, 100), (2, 90), (3, 80), (4, 95), (5, 50)].into_iter().collect();

        let series = derive_max_gas_verify(&helper, 8).unwrap();

        assert_eq!(pairs(&series), vec![(1, 100), (3, 95), (7, 90)]);
    }

    #[test]
    fn test_verify_empty_window() {
        let helper: GasSeries = [(1, 100), (2, 90), (9, 70)].into_iter().collect();

        assert_eq!(
            derive_max_gas_verify(&helper, 8),
            Err(GasError::MissingBucket { table: "max_gas_verify helper", index: 3 })
        );
    }
}
