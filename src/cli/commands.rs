use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tradebook", about = "Trade ledger with a normalizing import pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a CSV file and show per-row results without persisting
    Preview {
        /// Path to the CSV file
        file: String,
    },
    /// Parse a CSV file and persist the valid rows
    Import {
        /// Path to the CSV file
        file: String,
    },
    /// Persist previously previewed rows (JSON array of raw records)
    Confirm {
        /// JSON array of raw rows, or a path when --file is set
        rows: String,
        #[arg(long)]
        file: bool,
    },
    /// Fetch trade history from a broker and import it
    Sync {
        /// Broker name (alpaca, binance, metatrader, ibkr)
        broker: String,
        /// JSON credentials: api_key, api_secret, account_id, server_url, paper
        credentials: String,
    },
    /// Print the CSV import template
    Template,
    /// Add a single trade (JSON object; loose field names accepted)
    Add {
        json: String,
    },
    /// List trades, newest first
    Trades {
        #[arg(long)]
        asset_type: Option<String>,
        #[arg(long)]
        direction: Option<String>,
        #[arg(long, default_value = "50")]
        limit: usize,
        #[arg(long)]
        offset: Option<usize>,
    },
    /// Show one trade
    Get {
        id: String,
    },
    /// Edit a trade; PnL is recomputed from the merged fields
    Update {
        id: String,
        json: String,
    },
    /// Delete a trade
    Delete {
        id: String,
    },
    /// Ledger summary statistics
    Stats,
}
