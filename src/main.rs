use clap::Parser;
use tradebook::cli::commands::{Cli, Commands};
use tradebook::domain::entities::trade::RawTradeRecord;
use tradebook::domain::ports::trade_repository::TradeFilter;
use tradebook::domain::values::asset_class::AssetClass;
use tradebook::infrastructure::brokers::BrokerCredentials;
use tradebook::TradeBook;

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let db_path = std::env::var("TRADEBOOK_DB").unwrap_or_else(|_| "./tradebook.db".into());

    let tb = match TradeBook::new(&db_path) {
        Ok(tb) => tb,
        Err(e) => {
            eprintln!("Error initializing ledger: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(tb, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(tb: TradeBook, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Preview { file } => {
            let text = std::fs::read_to_string(&file)?;
            let preview = tb.preview_import(&text)?;
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
        Commands::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            let outcome = tb.import_csv(&text)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Confirm { rows, file } => {
            let text = if file { std::fs::read_to_string(&rows)? } else { rows };
            let rows: Vec<RawTradeRecord> = serde_json::from_str(&text)?;
            let outcome = tb.confirm_import(rows)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Sync { broker, credentials } => {
            let creds: BrokerCredentials = serde_json::from_str(&credentials)?;
            let outcome = tb.sync_broker(&broker, &creds).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Template => {
            print!("{}", TradeBook::csv_template());
        }
        Commands::Add { json } => {
            let record: RawTradeRecord = serde_json::from_str(&json)?;
            let trade = tb.add_trade(record)?;
            println!("{}", serde_json::to_string_pretty(&trade)?);
        }
        Commands::Trades {
            asset_type,
            direction,
            limit,
            offset,
        } => {
            let filter = TradeFilter {
                asset_type: asset_type.map(|a| AssetClass::from_loose(Some(&a))),
                direction: direction.map(|d| d.parse()).transpose().map_err(|e: String| e)?,
                limit: Some(limit),
                offset,
            };
            let trades = tb.list_trades(&filter)?;
            println!("{}", serde_json::to_string_pretty(&trades)?);
        }
        Commands::Get { id } => {
            let trade = tb.get_trade(&id)?;
            println!("{}", serde_json::to_string_pretty(&trade)?);
        }
        Commands::Update { id, json } => {
            let patch: RawTradeRecord = serde_json::from_str(&json)?;
            let trade = tb.update_trade(&id, patch)?;
            println!("{}", serde_json::to_string_pretty(&trade)?);
        }
        Commands::Delete { id } => {
            tb.delete_trade(&id)?;
            println!("Trade {id} deleted");
        }
        Commands::Stats => {
            let stats = tb.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
