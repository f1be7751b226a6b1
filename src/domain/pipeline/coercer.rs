use crate::domain::entities::trade::RawTradeRecord;
use crate::domain::values::asset_class::AssetClass;
use crate::domain::values::direction::Direction;
use serde::Serialize;
use serde_json::Value;

/// A raw record after type coercion, before validation. Required numeric
/// fields use `f64::NAN` as the "could not parse" sentinel so the validator
/// can report every defect per field instead of failing on the first.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateTrade {
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
    /// Source-supplied PnL. Only trusted for broker sources.
    pub pnl: Option<f64>,
    /// Source-supplied identity, used for dedup when present.
    pub id: Option<String>,
    pub broker: Option<String>,
    pub broker_trade_id: Option<String>,
}

/// Coerces a normalized record into typed values. Deterministic, never fails.
pub fn coerce(record: &RawTradeRecord) -> CandidateTrade {
    CandidateTrade {
        symbol: text(record, "symbol").unwrap_or_default(),
        asset_type: AssetClass::from_loose(text(record, "asset_type").as_deref()),
        direction: Direction::from_loose(text(record, "direction").as_deref()),
        entry_price: number(record, "entry_price"),
        exit_price: number(record, "exit_price"),
        quantity: number(record, "quantity"),
        entry_date: text(record, "entry_date"),
        exit_date: text(record, "exit_date"),
        stop_loss: optional_number(record, "stop_loss"),
        take_profit: optional_number(record, "take_profit"),
        commission: optional_number(record, "commission").unwrap_or(0.0),
        strategy: text(record, "strategy"),
        notes: text(record, "notes"),
        market_conditions: text(record, "market_conditions"),
        pnl: optional_number(record, "pnl"),
        id: text(record, "id"),
        broker: text(record, "broker"),
        broker_trade_id: text(record, "broker_trade_id"),
    }
}

/// Parses a value as a float after stripping currency formatting (`$` and
/// thousands separators). Unparsable or absent input yields NaN.
fn number(record: &RawTradeRecord, key: &str) -> f64 {
    match record.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_money(s),
        _ => f64::NAN,
    }
}

fn optional_number(record: &RawTradeRecord, key: &str) -> Option<f64> {
    let v = number(record, key);
    if v.is_nan() {
        None
    } else {
        Some(v)
    }
}

fn parse_money(s: &str) -> f64 {
    let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Non-empty trimmed text of a field, stringifying bare numbers so sources
/// that send e.g. a numeric broker_trade_id still coerce.
fn text(record: &RawTradeRecord, key: &str) -> Option<String> {
    match record.get(key) {
        Some(Value::String(s)) => {
            let t = s.trim();
            if t.is_empty() {
                None
            } else {
                Some(t.to_string())
            }
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> RawTradeRecord {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn strips_currency_formatting_from_numbers() {
        let cand = coerce(&record(&[
            ("symbol", json!("AAPL")),
            ("entry_price", json!("$1,178.50")),
            ("exit_price", json!(182.30)),
            ("quantity", json!("100")),
        ]));
        assert_eq!(cand.entry_price, 1178.50);
        assert_eq!(cand.exit_price, 182.30);
        assert_eq!(cand.quantity, 100.0);
    }

    #[test]
    fn unparsable_numbers_become_nan_not_failures() {
        let cand = coerce(&record(&[("entry_price", json!("n/a"))]));
        assert!(cand.entry_price.is_nan());
        assert!(cand.exit_price.is_nan());
    }

    #[test]
    fn commission_defaults_to_zero() {
        let cand = coerce(&record(&[("commission", json!("abc"))]));
        assert_eq!(cand.commission, 0.0);
        assert_eq!(coerce(&record(&[])).commission, 0.0);
    }

    #[test]
    fn direction_and_asset_vocabulary_are_mapped() {
        let cand = coerce(&record(&[
            ("direction", json!("Sell")),
            ("asset_type", json!("equities")),
        ]));
        assert_eq!(cand.direction, Direction::Short);
        assert_eq!(cand.asset_type, AssetClass::Stock);
    }

    #[test]
    fn blank_optional_fields_stay_absent() {
        let cand = coerce(&record(&[("strategy", json!("  ")), ("notes", json!(""))]));
        assert_eq!(cand.strategy, None);
        assert_eq!(cand.notes, None);
        assert_eq!(cand.stop_loss, None);
    }
}
