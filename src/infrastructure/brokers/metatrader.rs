use super::{put_num, put_str, BrokerAdapter, BrokerCredentials, BrokerError};
use crate::domain::entities::trade::RawTradeRecord;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

/// MetaTrader deal-history adapter, reached through a broker-supplied
/// gateway. Unlike Alpaca and Binance, the MT gateway reports each deal's
/// realized profit including fees we never see, so its `profit` field is
/// passed through as authoritative `pnl`.
pub struct MetaTraderAdapter {
    client: reqwest::Client,
}

impl MetaTraderAdapter {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Tradebook/0.1")
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for MetaTraderAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct MtDeal {
    deal: u64,
    symbol: String,
    /// 0 = buy, anything else = sell.
    #[serde(rename = "type")]
    deal_type: i64,
    price: f64,
    volume: f64,
    /// Deal time in epoch seconds.
    time: i64,
    #[serde(default)]
    commission: Option<f64>,
    #[serde(default)]
    profit: Option<f64>,
}

pub(crate) fn deal_to_record(deal: &MtDeal) -> RawTradeRecord {
    let mut rec = RawTradeRecord::new();
    put_str(&mut rec, "symbol", deal.symbol.clone());
    put_str(&mut rec, "asset_type", "forex");
    put_str(&mut rec, "direction", if deal.deal_type == 0 { "long" } else { "short" });
    put_num(&mut rec, "entry_price", deal.price);
    put_num(&mut rec, "exit_price", deal.price);
    put_num(&mut rec, "quantity", deal.volume);
    let when = Utc
        .timestamp_opt(deal.time, 0)
        .single()
        .map(|dt| dt.to_rfc3339());
    if let Some(when) = when {
        put_str(&mut rec, "entry_date", when.clone());
        put_str(&mut rec, "exit_date", when);
    }
    put_num(&mut rec, "commission", deal.commission.unwrap_or(0.0));
    put_str(&mut rec, "broker", "metatrader");
    put_str(&mut rec, "broker_trade_id", deal.deal.to_string());
    if let Some(profit) = deal.profit {
        put_num(&mut rec, "pnl", profit);
    }
    rec
}

#[async_trait]
impl BrokerAdapter for MetaTraderAdapter {
    fn name(&self) -> &str {
        "metatrader"
    }

    async fn fetch(&self, creds: &BrokerCredentials) -> Result<Vec<RawTradeRecord>, BrokerError> {
        let server_url = creds.server_url.as_deref().ok_or_else(|| {
            BrokerError::Config("MetaTrader requires a server_url from your broker".to_string())
        })?;

        let mut request = self
            .client
            .get(format!("{server_url}/api/mt/deals"))
            .bearer_auth(&creds.api_key)
            .query(&[("limit", "500")]);
        if let Some(account) = &creds.account_id {
            request = request.query(&[("account", account.as_str())]);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| BrokerError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(BrokerError::Network(format!(
                "MetaTrader gateway returned {}",
                resp.status()
            )));
        }

        let deals: Vec<MtDeal> = resp
            .json()
            .await
            .map_err(|e| BrokerError::Parse(e.to_string()))?;

        Ok(deals.iter().map(deal_to_record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deal_profit_is_passed_through_as_pnl() {
        let deal: MtDeal = serde_json::from_value(json!({
            "deal": 99123,
            "symbol": "EURUSD",
            "type": 1,
            "price": 1.0842,
            "volume": 0.5,
            "time": 1736505000,
            "commission": 0.7,
            "profit": 15.5
        }))
        .unwrap();

        let rec = deal_to_record(&deal);
        assert_eq!(rec.get("pnl"), Some(&json!(15.5)));
        assert_eq!(rec.get("direction"), Some(&json!("short")));
        assert_eq!(rec.get("asset_type"), Some(&json!("forex")));
        assert_eq!(rec.get("broker_trade_id"), Some(&json!("99123")));
    }

    #[tokio::test]
    async fn fetch_without_server_url_is_a_config_error() {
        let adapter = MetaTraderAdapter::new();
        let creds = BrokerCredentials {
            api_key: "k".to_string(),
            ..Default::default()
        };
        let err = adapter.fetch(&creds).await.unwrap_err();
        assert!(matches!(err, BrokerError::Config(_)));
    }
}
