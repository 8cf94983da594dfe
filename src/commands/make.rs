//! Make command: run the whole pipeline from a YAML configuration.
//!
//! The pipeline:
//! 1. Merges raw mint and verify gas
//! 2. Derives max gas per MMR height
//! 3. Extends verify gas to every token count
//! 4. Aggregates gas per period for every configured collection

use super::collection::execute_collection_gas;
use super::gas::{execute_extend_gas, execute_max_gas, execute_merge_gas};
use super::models::{CollectionGasArgs, ExtendGasArgs, MakeArgs, MaxGasArgs, MergeGasArgs};
use crate::collection::parse_period;
use crate::pipeline::{CollectionConfig, PipelineConfig};
use anyhow::{Context, Result};
use log::{info, warn};
use std::time::Instant;

/// Execute the make command
///
/// **Public** - main entry point called from main.rs
pub fn execute_make(args: &MakeArgs) -> Result<()> {
    let start_time = Instant::now();

    let config = PipelineConfig::load(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;

    if args.steps.includes_gas() {
        run_gas_steps(&config)?;
    }

    if args.steps.includes_collections() {
        if config.collections.is_empty() {
            warn!("No collections configured");
        }

        for (i, collection) in config.collections.iter().enumerate() {
            info!("Collection {}/{}: {}", i + 1, config.collections.len(), collection.display_name());
            run_collection(&config, collection)?;
        }
    }

    info!("Pipeline completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Merge, max-gas and extend, chained through the configured files
fn run_gas_steps(config: &PipelineConfig) -> Result<()> {
    let raw = &config.data.gas.raw;
    let derived = &config.data.gas.derived;

    info!("Step 1/3: Merging raw gas...");
    execute_merge_gas(&MergeGasArgs {
        raw_mint: raw.mint.clone(),
        raw_verify: raw.verify.clone(),
        output: derived.merged.clone(),
    })?;

    info!("Step 2/3: Deriving max gas...");
    let num_tokens = execute_max_gas(&MaxGasArgs {
        merged: derived.merged.clone(),
        helper_max_verify: raw.max_verify.clone(),
        output: derived.max.clone(),
        num_tokens: config.num_tokens,
    })?;

    info!("Step 3/3: Extending verify gas up to {} tokens...", num_tokens);
    execute_extend_gas(&ExtendGasArgs {
        merged: derived.merged.clone(),
        max_gas: derived.max.clone(),
        output: derived.complete.clone(),
    })?;

    Ok(())
}

fn run_collection(config: &PipelineConfig, collection: &CollectionConfig) -> Result<()> {
    let period = parse_period(&collection.aggregation_period)
        .with_context(|| format!("Invalid aggregation period for '{}'", collection.id))?;

    execute_collection_gas(&CollectionGasArgs {
        gas: config.data.gas.derived.complete.clone(),
        transfers: config.transfers_path(&collection.id)?.to_path_buf(),
        output: config.collection_gas_path(&collection.id)?.to_path_buf(),
        period,
        print_summary: false,
    })
}
