use crate::domain::values::asset_class::AssetClass;
use crate::domain::values::direction::Direction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw candidate row as it arrives from any source: a CSV line keyed by its
/// header, a JSON bulk-entry object, or a broker adapter's output. The
/// pipeline normalizes keys and coerces values before anything is persisted.
pub type RawTradeRecord = serde_json::Map<String, serde_json::Value>;

/// The canonical record every source converges to. Created exactly once by
/// the batch importer after validation; `pnl` is always derived unless a
/// broker supplied an authoritative value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub symbol: String,
    pub asset_type: AssetClass,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub quantity: f64,
    pub entry_date: Option<String>,
    pub exit_date: Option<String>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub commission: f64,
    pub strategy: Option<String>,
    pub notes: Option<String>,
    pub market_conditions: Option<String>,
    pub pnl: f64,
    pub broker: String,
    pub broker_trade_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
