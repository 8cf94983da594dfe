use crate::utils::config::SCHEMA_VERSION;

/// Display the column layout of every artifact
pub fn display_schema(show_details: bool) {
    println!("MMR Gas Analysis Table Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Raw gas (0-based rows):");
        println!("  gas_mint | gas_verify: integer?  - One measurement per row");
        println!("Merged / complete gas (index = token count):");
        println!("  gas_mint: integer?               - Mint gas at n tokens");
        println!("  gas_verify: integer?             - Verify gas at n tokens");
        println!("Max verify helper (index = MMR bucket key):");
        println!("  gas_verify: integer              - Measured worst-case verify gas");
        println!("Max gas (index = 2^i+1 or 2^i-1):");
        println!("  max_gas_mint: integer?           - Worst-case mint gas at 2^i+1");
        println!("  max_gas_verify: integer?         - Worst-case verify gas at 2^i-1");
        println!("Transfers:");
        println!("  fromId: integer                  - 0 for a mint");
        println!("  toId: integer                    - 0 for a burn");
        println!("  timestamp: integer               - Unix seconds, ascending");
        println!("Collection gas (one row per period):");
        println!("  ts: integer                      - Period start, Unix seconds");
        println!("  num_tokens, num_transfers        - Activity in the period");
        println!("  total_num_tokens, total_num_transfers");
        println!("  gas_mint, gas_verify             - Gas spent in the period");
        println!("  total_gas_mint, total_gas_verify");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("MMR Gas Analysis v{}", env!("CARGO_PKG_VERSION"));
    println!("Table Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Worst-case gas of MMR-backed NFT mint/verify and per-collection gas over time.");
}
