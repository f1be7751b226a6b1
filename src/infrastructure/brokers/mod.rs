pub mod alpaca;
pub mod binance;
pub mod ibkr;
pub mod metatrader;

use crate::domain::entities::trade::RawTradeRecord;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Number, Value};
use thiserror::Error;

/// Credentials handed over by the connection-management side. Which fields
/// are required depends on the broker.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrokerCredentials {
    pub api_key: String,
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    /// Broker-supplied gateway base URL (MetaTrader).
    #[serde(default)]
    pub server_url: Option<String>,
    /// Use the paper-trading endpoint where the broker offers one (Alpaca).
    #[serde(default)]
    pub paper: bool,
}

/// One adapter per external broker: a pure translation from that broker's
/// trade-history wire format into raw records the import pipeline accepts.
/// Adapters never touch persistence.
#[async_trait]
pub trait BrokerAdapter: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, creds: &BrokerCredentials) -> Result<Vec<RawTradeRecord>, BrokerError>;
}

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unsupported broker: {0}")]
    Unsupported(String),
}

/// Name-keyed adapter dispatch. Fails before any network call for a broker
/// we have no adapter for.
pub fn adapter_for(name: &str) -> Result<Box<dyn BrokerAdapter>, BrokerError> {
    match name.to_lowercase().as_str() {
        "alpaca" => Ok(Box::new(alpaca::AlpacaAdapter::new())),
        "binance" => Ok(Box::new(binance::BinanceAdapter::new())),
        "metatrader" => Ok(Box::new(metatrader::MetaTraderAdapter::new())),
        "ibkr" => Ok(Box::new(ibkr::IbkrAdapter)),
        other => Err(BrokerError::Unsupported(other.to_string())),
    }
}

// Record-building helpers shared by the adapters.

pub(crate) fn put_str(record: &mut RawTradeRecord, key: &str, value: impl Into<String>) {
    record.insert(key.to_string(), Value::String(value.into()));
}

pub(crate) fn put_num(record: &mut RawTradeRecord, key: &str, value: f64) {
    let v = Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null);
    record.insert(key.to_string(), v);
}
