//! MMR Gas Analysis CLI
//!
//! Derives worst-case mint/verify gas tables and aggregates the gas spent
//! by NFT collections over time.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use mmr_gas_analysis::collection::parse_period;
use mmr_gas_analysis::commands::{
    display_schema, display_version, execute_collection_gas, execute_count_transfers,
    execute_extend_gas, execute_make, execute_max_gas, execute_merge_gas, CollectionGasArgs,
    ExtendGasArgs, MakeArgs, MakeSteps, MaxGasArgs, MergeGasArgs,
};
use mmr_gas_analysis::utils::config::DEFAULT_CONFIG_FILE;

/// MMR Gas Analysis - gas statistics for MMR-backed NFT collections
#[derive(Parser, Debug)]
#[command(name = "mmr-gas")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge the raw gas data of mint and verify
    MergeGas {
        /// CSV file containing the raw mint gas data
        raw_gas_mint: PathBuf,

        /// CSV file containing the raw verify gas data
        raw_gas_verify: PathBuf,

        /// Output CSV file
        output: PathBuf,
    },

    /// Compute the maximum gas at each MMR height for mint and verify
    MaxGas {
        /// Merged mint and verify gas CSV file
        gas: PathBuf,

        /// Helper CSV file with the max verify gas around several 2^n
        ext_max_gas_verify: PathBuf,

        /// Output CSV file (max mint gas at 2^n + 1, max verify gas at 2^n - 1)
        output: PathBuf,

        /// Number of tokens in the collection (defaults to the rows of the gas file)
        #[arg(short, long)]
        num_tokens: Option<u64>,
    },

    /// Extend verify gas as the worst case of each gas-limit bucket
    ExtendGas {
        /// Merged mint and verify gas CSV file
        gas: PathBuf,

        /// Max gas CSV file produced by max-gas
        max_gas: PathBuf,

        /// Output CSV file
        output: PathBuf,
    },

    /// Calculate the gas consumption of an NFT collection over time
    CollectionGas {
        /// Complete mint and verify gas CSV file
        gas: PathBuf,

        /// NFT transfers CSV file (fromId, toId, timestamp)
        transfers: PathBuf,

        /// Output CSV file, one row per period
        output: PathBuf,

        /// Aggregation period, e.g. "1week", "7days", "1d 12h"
        #[arg(long, default_value = "1week")]
        period: String,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Count mints and real transfers in a transfers CSV file
    CountTransfers {
        /// NFT transfers CSV file
        transfers: PathBuf,

        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the whole pipeline described by a YAML config file
    Make {
        /// Pipeline configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Only derive the gas tables
        #[arg(long, conflicts_with = "calculate_collection_gas")]
        calculate_gas: bool,

        /// Only derive the collection gas tables
        #[arg(long)]
        calculate_collection_gas: bool,
    },

    /// Display table schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::MergeGas {
            raw_gas_mint,
            raw_gas_verify,
            output,
        } => {
            execute_merge_gas(&MergeGasArgs {
                raw_mint: raw_gas_mint,
                raw_verify: raw_gas_verify,
                output,
            })?;
        }

        Commands::MaxGas {
            gas,
            ext_max_gas_verify,
            output,
            num_tokens,
        } => {
            execute_max_gas(&MaxGasArgs {
                merged: gas,
                helper_max_verify: ext_max_gas_verify,
                output,
                num_tokens,
            })?;
        }

        Commands::ExtendGas { gas, max_gas, output } => {
            execute_extend_gas(&ExtendGasArgs {
                merged: gas,
                max_gas,
                output,
            })?;
        }

        Commands::CollectionGas {
            gas,
            transfers,
            output,
            period,
            summary,
        } => {
            let args = CollectionGasArgs {
                gas,
                transfers,
                output,
                period: parse_period(&period)?,
                print_summary: summary,
            };

            execute_collection_gas(&args)?;
        }

        Commands::CountTransfers { transfers, json } => {
            execute_count_transfers(&transfers, json)?;
        }

        Commands::Make {
            config,
            calculate_gas,
            calculate_collection_gas,
        } => {
            let steps = if calculate_gas {
                MakeSteps::Gas
            } else if calculate_collection_gas {
                MakeSteps::Collections
            } else {
                MakeSteps::All
            };

            execute_make(&MakeArgs { config, steps })?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
