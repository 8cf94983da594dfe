//! Collection commands: collection-gas and count-transfers.

use super::gas::validate_output;
use super::models::CollectionGasArgs;
use crate::collection::{count_mints_transfers, derive_collection_gas, format_ts, period_secs};
use crate::table::{read_gas_table, read_transfers, write_period_buckets, PeriodBucket};
use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::time::Instant;

/// Execute the collection-gas command
///
/// **Public** - main entry point called from main.rs and make
///
/// # Errors
/// * Unreadable gas table or transfer log
/// * First transfer not a mint, or gas table not covering the collection
/// * File write errors
pub fn execute_collection_gas(args: &CollectionGasArgs) -> Result<()> {
    let start_time = Instant::now();

    validate_args(args)?;

    info!("Step 1/3: Reading gas table and transfers...");
    let gas = read_gas_table(&args.gas)
        .with_context(|| format!("Failed to read gas table {}", args.gas.display()))?;
    let transfers = read_transfers(&args.transfers)
        .with_context(|| format!("Failed to read transfers {}", args.transfers.display()))?;

    info!("Step 2/3: Aggregating {} transfers by {}...",
          transfers.len(),
          humantime::format_duration(args.period));
    let buckets = derive_collection_gas(&gas, &transfers, args.period)
        .with_context(|| format!("Failed to aggregate {}", args.transfers.display()))?;

    info!("Step 3/3: Writing output file...");
    write_period_buckets(&buckets, &args.output).context("Failed to write collection gas")?;

    info!("✓ Collection gas written to: {}", args.output.display());

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("COLLECTION GAS SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Transfers: {}", args.transfers.display());
        println!("Periods:   {}", buckets.len());
        println!("\n{}", format_summary(&buckets));
        println!("{}", "=".repeat(80));
    }

    info!("Aggregation completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Execute the count-transfers command
///
/// **Public** - prints the number of mints and real transfers
pub fn execute_count_transfers(transfers_path: &Path, json: bool) -> Result<()> {
    let transfers = read_transfers(transfers_path)
        .with_context(|| format!("Failed to read transfers {}", transfers_path.display()))?;

    let counts = count_mints_transfers(&transfers);

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        println!("Number of mints: {}", counts.mints);
        println!("Number of real transfers (excluding mints): {}", counts.transfers);
    }

    Ok(())
}

/// Validate collection-gas arguments
///
/// **Public** - can be called before execute_collection_gas for early validation
pub fn validate_args(args: &CollectionGasArgs) -> Result<()> {
    validate_output(&args.output, &[args.gas.as_path(), args.transfers.as_path()])?;
    period_secs(args.period)?;
    Ok(())
}

/// Render buckets as a fixed width text table
pub fn format_summary(buckets: &[PeriodBucket]) -> String {
    let mut out = format!(
        "{:<26} {:>8} {:>10} {:>14} {:>14}\n",
        "period start", "tokens", "transfers", "gas mint", "gas verify"
    );

    for bucket in buckets {
        out.push_str(&format!(
            "{:<26} {:>8} {:>10} {:>14} {:>14}\n",
            format_ts(bucket.ts),
            bucket.num_tokens,
            bucket.num_transfers,
            bucket.gas_mint,
            bucket.gas_verify
        ));
    }

    if let Some(last) = buckets.last() {
        out.push_str(&format!(
            "{:<26} {:>8} {:>10} {:>14} {:>14}\n",
            "total",
            last.total_num_tokens,
            last.total_num_transfers,
            last.total_gas_mint,
            last.total_gas_verify
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&CollectionGasArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_args_zero_period() {
        let args = CollectionGasArgs {
            period: Duration::ZERO,
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_output_overwrites_input() {
        let args = CollectionGasArgs {
            output: PathBuf::from("transfers.csv"),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_format_summary_has_totals() {
        let bucket = PeriodBucket {
            ts: 0,
            num_tokens: 3,
            total_num_tokens: 3,
            gas_mint: 90,
            total_gas_mint: 90,
            ..Default::default()
        };

        let summary = format_summary(&[bucket]);

        assert!(summary.contains("1970-01-01T00:00:00+00:00"));
        assert!(summary.lines().last().unwrap().starts_with("total"));
        assert_eq!(summary.lines().count(), 3);
    }
}
