//! Gas table commands: merge, max-gas and extend.
//!
//! Each command reads its inputs, computes the whole result in memory and
//! only then writes the output file.

use super::models::{ExtendGasArgs, MaxGasArgs, MergeGasArgs};
use crate::gas::{derive_max_gas_mint, derive_max_gas_verify, extend_gas, merge_gas_mint_verify};
use crate::table::{
    read_gas_series, read_gas_table, read_max_gas_table, read_raw_gas, validate_path,
    write_gas_table, write_max_gas_table, MaxGasTable,
};
use crate::utils::config::{COL_GAS_MINT, COL_GAS_VERIFY};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;

/// Execute the merge-gas command
///
/// **Public** - main entry point called from main.rs and make
pub fn execute_merge_gas(args: &MergeGasArgs) -> Result<()> {
    validate_output(&args.output, &[args.raw_mint.as_path(), args.raw_verify.as_path()])?;

    info!("Merging raw gas: {} + {}", args.raw_mint.display(), args.raw_verify.display());

    let raw_gas_mint = read_raw_gas(&args.raw_mint, COL_GAS_MINT)
        .with_context(|| format!("Failed to read raw mint gas {}", args.raw_mint.display()))?;
    let raw_gas_verify = read_raw_gas(&args.raw_verify, COL_GAS_VERIFY)
        .with_context(|| format!("Failed to read raw verify gas {}", args.raw_verify.display()))?;

    let gas = merge_gas_mint_verify(&raw_gas_mint, &raw_gas_verify)
        .context("Failed to merge mint and verify gas")?;

    write_gas_table(&gas, &args.output).context("Failed to write merged gas table")?;

    info!("✓ Merged gas ({} rows) written to: {}", gas.len(), args.output.display());
    Ok(())
}

/// Execute the max-gas command
///
/// **Public** - main entry point called from main.rs and make
///
/// # Returns
/// The collection size the series cover
pub fn execute_max_gas(args: &MaxGasArgs) -> Result<u64> {
    validate_output(&args.output, &[args.merged.as_path(), args.helper_max_verify.as_path()])?;

    let gas = read_gas_table(&args.merged)
        .with_context(|| format!("Failed to read merged gas table {}", args.merged.display()))?;
    let helper = read_gas_series(&args.helper_max_verify, COL_GAS_VERIFY).with_context(|| {
        format!("Failed to read max verify helper {}", args.helper_max_verify.display())
    })?;

    let num_tokens = match args.num_tokens {
        Some(n) => n,
        None => gas.max_index().context("Merged gas table is empty")?,
    };

    info!("Deriving max gas for {} tokens", num_tokens);

    let max_gas_mint = derive_max_gas_mint(&gas, num_tokens).context("Failed to derive max mint gas")?;
    let max_gas_verify = derive_max_gas_verify(&helper, num_tokens)
        .context("Failed to derive max verify gas")?;

    debug!("Max mint gas: {:?}", max_gas_mint);
    debug!("Max verify gas: {:?}", max_gas_verify);

    let max_gas = MaxGasTable::from_series(&max_gas_mint, &max_gas_verify);
    write_max_gas_table(&max_gas, &args.output).context("Failed to write max gas table")?;

    info!("✓ Max gas ({} boundaries) written to: {}", max_gas.len(), args.output.display());
    Ok(num_tokens)
}

/// Execute the extend-gas command
///
/// **Public** - main entry point called from main.rs and make
pub fn execute_extend_gas(args: &ExtendGasArgs) -> Result<()> {
    validate_output(&args.output, &[args.merged.as_path(), args.max_gas.as_path()])?;

    let gas = read_gas_table(&args.merged)
        .with_context(|| format!("Failed to read merged gas table {}", args.merged.display()))?;
    let max_gas = read_max_gas_table(&args.max_gas)
        .with_context(|| format!("Failed to read max gas table {}", args.max_gas.display()))?;

    let complete = extend_gas(&gas, &max_gas.verify_series()).context("Failed to extend verify gas")?;

    write_gas_table(&complete, &args.output).context("Failed to write complete gas table")?;

    info!("✓ Complete gas written to: {}", args.output.display());
    Ok(())
}

/// Validate an output path and make sure it does not clobber an input
///
/// **Public** - can be called before any execute_* for early validation
pub fn validate_output(output: &Path, inputs: &[&Path]) -> Result<()> {
    validate_path(output).with_context(|| format!("Invalid output path {}", output.display()))?;

    if inputs.iter().any(|input| *input == output) {
        anyhow::bail!("Output path {} is also an input", output.display());
    }

    Ok(())
}
