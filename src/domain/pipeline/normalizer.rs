use crate::domain::entities::trade::RawTradeRecord;

/// Rewrites every key of a raw record to its canonical name: slugify, then
/// look up the alias table. Unmapped keys pass through under their slug.
/// Total and deterministic; values are untouched.
pub fn normalize_fields(record: &RawTradeRecord) -> RawTradeRecord {
    let mut out = RawTradeRecord::new();
    for (key, value) in record {
        let slug = slugify(key);
        let canonical = alias(&slug).unwrap_or(slug.as_str());
        out.insert(canonical.to_string(), value.clone());
    }
    out
}

/// Lower-cases, collapses whitespace to `_`, drops everything outside
/// `[a-z_]`.
pub fn slugify(key: &str) -> String {
    let mut slug = String::with_capacity(key.len());
    let mut last_was_space = false;
    for ch in key.trim().to_lowercase().chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                slug.push('_');
            }
            last_was_space = true;
        } else {
            last_was_space = false;
            if ch.is_ascii_lowercase() || ch == '_' {
                slug.push(ch);
            }
        }
    }
    slug
}

/// Fixed alias table mapping loose column names to the canonical schema.
fn alias(slug: &str) -> Option<&'static str> {
    Some(match slug {
        "ticker" | "name" | "instrument" => "symbol",
        "type" | "class" | "asset_class" => "asset_type",
        "side" | "action" => "direction",
        "entry" | "open" | "open_price" => "entry_price",
        "exit" | "close" | "close_price" => "exit_price",
        "qty" | "size" | "units" | "shares" | "lots" => "quantity",
        "entry_time" | "open_date" => "entry_date",
        "exit_time" | "close_date" => "exit_date",
        "sl" | "stoploss" => "stop_loss",
        "tp" | "takeprofit" => "take_profit",
        "fee" | "fees" => "commission",
        "note" | "comment" => "notes",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, &str)]) -> RawTradeRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    #[test]
    fn slugify_collapses_whitespace_and_drops_symbols() {
        assert_eq!(slugify("Entry  Price"), "entry_price");
        assert_eq!(slugify("Stop Loss"), "stop_loss");
        assert_eq!(slugify("Close(Price)"), "closeprice");
    }

    #[test]
    fn aliases_map_to_canonical_names() {
        let normalized = record(&[("Ticker", "AAPL"), ("Side", "buy"), ("Qty", "10")]);
        let out = normalize_fields(&normalized);
        assert_eq!(out.get("symbol"), Some(&json!("AAPL")));
        assert_eq!(out.get("direction"), Some(&json!("buy")));
        assert_eq!(out.get("quantity"), Some(&json!("10")));
    }

    #[test]
    fn unmapped_keys_pass_through_slugified() {
        let out = normalize_fields(&record(&[("My Column", "x")]));
        assert_eq!(out.get("my_column"), Some(&json!("x")));
    }

    #[test]
    fn canonical_names_are_stable() {
        let out = normalize_fields(&record(&[("symbol", "TSLA"), ("entry_price", "1")]));
        assert_eq!(out.get("symbol"), Some(&json!("TSLA")));
        assert_eq!(out.get("entry_price"), Some(&json!("1")));
    }
}
