use super::{put_num, put_str, BrokerAdapter, BrokerCredentials, BrokerError};
use crate::domain::entities::trade::RawTradeRecord;
use async_trait::async_trait;

/// Alpaca order-history adapter. Pulls closed orders and keeps only the
/// filled ones. Alpaca reports fill prices but no realized PnL, so no `pnl`
/// field is emitted and the pipeline computes it.
pub struct AlpacaAdapter {
    client: reqwest::Client,
}

impl AlpacaAdapter {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Tradebook/0.1")
                .build()
                .unwrap_or_default(),
        }
    }

    fn base_url(paper: bool) -> &'static str {
        if paper {
            "https://paper-api.alpaca.markets"
        } else {
            "https://api.alpaca.markets"
        }
    }
}

impl Default for AlpacaAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct AlpacaOrder {
    id: String,
    symbol: String,
    side: String,
    #[serde(default)]
    asset_class: Option<String>,
    #[serde(default)]
    order_type: Option<String>,
    #[serde(default)]
    filled_at: Option<String>,
    #[serde(default)]
    submitted_at: Option<String>,
    #[serde(default)]
    filled_avg_price: Option<String>,
    #[serde(default)]
    limit_price: Option<String>,
    #[serde(default)]
    filled_qty: Option<String>,
}

impl AlpacaOrder {
    // The limit price stands in for the entry only; the exit leg must be an
    // actual fill price.
    fn entry_price(&self) -> f64 {
        parse_or_zero(self.filled_avg_price.as_deref())
            .or_else(|| parse_or_zero(self.limit_price.as_deref()))
            .unwrap_or(0.0)
    }

    fn exit_price(&self) -> f64 {
        parse_or_zero(self.filled_avg_price.as_deref()).unwrap_or(0.0)
    }
}

fn parse_or_zero(s: Option<&str>) -> Option<f64> {
    s.and_then(|v| v.parse::<f64>().ok())
}

pub(crate) fn order_to_record(order: &AlpacaOrder) -> RawTradeRecord {
    let mut rec = RawTradeRecord::new();
    put_str(&mut rec, "symbol", order.symbol.clone());
    let asset = match order.asset_class.as_deref() {
        Some("crypto") => "crypto",
        _ => "stock",
    };
    put_str(&mut rec, "asset_type", asset);
    let direction = if order.side == "buy" { "long" } else { "short" };
    put_str(&mut rec, "direction", direction);
    put_num(&mut rec, "entry_price", order.entry_price());
    put_num(&mut rec, "exit_price", order.exit_price());
    put_num(
        &mut rec,
        "quantity",
        parse_or_zero(order.filled_qty.as_deref()).unwrap_or(0.0),
    );
    if let Some(submitted) = &order.submitted_at {
        put_str(&mut rec, "entry_date", submitted.clone());
    }
    if let Some(filled) = &order.filled_at {
        put_str(&mut rec, "exit_date", filled.clone());
    }
    put_num(&mut rec, "commission", 0.0);
    put_str(&mut rec, "broker", "alpaca");
    put_str(&mut rec, "broker_trade_id", order.id.clone());
    put_str(&mut rec, "strategy", "Alpaca Import");
    if let Some(order_type) = &order.order_type {
        put_str(&mut rec, "notes", format!("Type: {order_type}"));
    }
    rec
}

#[async_trait]
impl BrokerAdapter for AlpacaAdapter {
    fn name(&self) -> &str {
        "alpaca"
    }

    async fn fetch(&self, creds: &BrokerCredentials) -> Result<Vec<RawTradeRecord>, BrokerError> {
        let secret = creds
            .api_secret
            .as_deref()
            .ok_or_else(|| BrokerError::Config("Alpaca requires an api_secret".to_string()))?;

        let resp = self
            .client
            .get(format!("{}/v2/orders", Self::base_url(creds.paper)))
            .header("APCA-API-KEY-ID", &creds.api_key)
            .header("APCA-API-SECRET-KEY", secret)
            .query(&[("status", "closed"), ("limit", "500"), ("direction", "desc")])
            .send()
            .await
            .map_err(|e| BrokerError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(BrokerError::Network(format!(
                "Alpaca API returned {}",
                resp.status()
            )));
        }

        let orders: Vec<AlpacaOrder> = resp
            .json()
            .await
            .map_err(|e| BrokerError::Parse(e.to_string()))?;

        Ok(orders
            .iter()
            .filter(|o| o.filled_at.is_some())
            .map(order_to_record)
            .collect())
    }
}
