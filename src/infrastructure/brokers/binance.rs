use super::{put_num, put_str, BrokerAdapter, BrokerCredentials, BrokerError};
use crate::domain::entities::trade::RawTradeRecord;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Binance account-trades adapter. Requests are authenticated with an
/// HMAC-SHA256 signature of the query string. Binance reports per-fill
/// prices, not realized PnL, so no `pnl` field is emitted.
pub struct BinanceAdapter {
    base_url: String,
    client: reqwest::Client,
}

impl BinanceAdapter {
    pub fn new() -> Self {
        Self {
            base_url: "https://api.binance.com".to_string(),
            client: reqwest::Client::builder()
                .user_agent("Tradebook/0.1")
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for BinanceAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase hex HMAC-SHA256 of the query string, keyed by the API secret.
pub(crate) fn sign_query(query: &str, secret: &str) -> Result<String, BrokerError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| BrokerError::Config(format!("Invalid Binance api_secret: {e}")))?;
    mac.update(query.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct BinanceFill {
    id: u64,
    symbol: String,
    price: String,
    qty: String,
    #[serde(default)]
    commission: Option<String>,
    #[serde(rename = "isBuyer")]
    is_buyer: bool,
    /// Fill time in epoch milliseconds.
    time: i64,
}

pub(crate) fn fill_to_record(fill: &BinanceFill) -> RawTradeRecord {
    let mut rec = RawTradeRecord::new();
    put_str(&mut rec, "symbol", fill.symbol.clone());
    put_str(&mut rec, "asset_type", "crypto");
    put_str(&mut rec, "direction", if fill.is_buyer { "long" } else { "short" });
    let price = fill.price.parse::<f64>().unwrap_or(0.0);
    put_num(&mut rec, "entry_price", price);
    put_num(&mut rec, "exit_price", price);
    put_num(&mut rec, "quantity", fill.qty.parse::<f64>().unwrap_or(0.0));
    let when = Utc
        .timestamp_millis_opt(fill.time)
        .single()
        .map(|dt| dt.to_rfc3339());
    if let Some(when) = when {
        put_str(&mut rec, "entry_date", when.clone());
        put_str(&mut rec, "exit_date", when);
    }
    put_num(
        &mut rec,
        "commission",
        fill.commission
            .as_deref()
            .and_then(|c| c.parse::<f64>().ok())
            .unwrap_or(0.0),
    );
    put_str(&mut rec, "broker", "binance");
    put_str(&mut rec, "broker_trade_id", fill.id.to_string());
    rec
}

#[async_trait]
impl BrokerAdapter for BinanceAdapter {
    fn name(&self) -> &str {
        "binance"
    }

    async fn fetch(&self, creds: &BrokerCredentials) -> Result<Vec<RawTradeRecord>, BrokerError> {
        let secret = creds
            .api_secret
            .as_deref()
            .ok_or_else(|| BrokerError::Config("Binance requires an api_secret".to_string()))?;

        let timestamp = Utc::now().timestamp_millis();
        let query = format!("timestamp={timestamp}&limit=500");
        let signature = sign_query(&query, secret)?;

        let resp = self
            .client
            .get(format!(
                "{}/api/v3/myTrades?{query}&signature={signature}",
                self.base_url
            ))
            .header("X-MBX-APIKEY", &creds.api_key)
            .send()
            .await
            .map_err(|e| BrokerError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(BrokerError::Network(format!(
                "Binance API returned {}",
                resp.status()
            )));
        }

        let fills: Vec<BinanceFill> = resp
            .json()
            .await
            .map_err(|e| BrokerError::Parse(e.to_string()))?;

        Ok(fills.iter().map(fill_to_record).collect())
    }
}
