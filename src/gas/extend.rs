//! Fill unmeasured verify gas with the worst case of its gas-limit bucket.

use crate::table::{GasSeries, GasTable};
use crate::utils::error::GasError;
use log::{debug, info};

/// Gas-limit bucket of token index `n`: the largest `2^i - 1` that is `<= n`
pub fn gas_limit_index(n: u64) -> u64 {
    let bit_length = u64::BITS - n.saturating_add(1).leading_zeros();
    (1u64 << (bit_length - 1)) - 1
}

/// Extend the verify column of a merged gas table
///
/// **Public** - last step of the gas pipeline
///
/// # Arguments
/// * `gas` - Merged gas table; left untouched
/// * `max_gas_verify` - Max verify series keyed by `2^i - 1`
///
/// # Returns
/// A new table where every absent `gas_verify` from the first absent row
/// onward holds `max_gas_verify[gas_limit_index(n)]`. Present cells are
/// copied unchanged; a table with no absent cell is returned as is.
///
/// # Errors
/// * `GasError::MissingBucket` - a needed bucket is not in `max_gas_verify`
pub fn extend_gas(gas: &GasTable, max_gas_verify: &GasSeries) -> Result<GasTable, GasError> {
    let mut extended = gas.clone();

    let Some(first_absent) = gas
        .iter()
        .find(|(_, row)| row.gas_verify.is_none())
        .map(|(n, _)| n)
    else {
        debug!("No absent verify gas, nothing to extend");
        return Ok(extended);
    };

    debug!("Extending verify gas from n = {}", first_absent);

    let mut filled = 0usize;
    for (n, row) in extended.iter_mut() {
        if *n < first_absent || row.gas_verify.is_some() {
            continue;
        }

        let bucket = gas_limit_index(*n);
        let gas = max_gas_verify
            .get(bucket)
            .ok_or(GasError::MissingBucket { table: "max_gas_verify", index: bucket })?;

        row.gas_verify = Some(gas);
        filled += 1;
    }

    info!("Filled {} verify gas cells from n = {}", filled, first_absent);
    Ok(extended)
}
