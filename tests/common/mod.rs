//! Shared test helpers.

use serde_json::{json, Value};
use tradebook::domain::entities::trade::RawTradeRecord;
use tradebook::TradeBook;

pub fn setup() -> TradeBook {
    TradeBook::new(":memory:").unwrap()
}

pub fn record(pairs: &[(&str, Value)]) -> RawTradeRecord {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

/// A row that passes validation: long 100 @ 178.50 → 182.30, $2 commission,
/// PnL 378.00.
pub fn valid_row(symbol: &str) -> RawTradeRecord {
    record(&[
        ("symbol", json!(symbol)),
        ("entry_price", json!("178.50")),
        ("exit_price", json!("182.30")),
        ("quantity", json!("100")),
        ("commission", json!("2.00")),
    ])
}
