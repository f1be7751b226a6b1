use super::{BrokerAdapter, BrokerCredentials, BrokerError};
use crate::domain::entities::trade::RawTradeRecord;
use async_trait::async_trait;

/// Interactive Brokers stub. Their API is only reachable through a locally
/// running gateway this adapter set cannot assume, so fetch always fails with
/// a pointer to the CSV export path.
pub struct IbkrAdapter;

#[async_trait]
impl BrokerAdapter for IbkrAdapter {
    fn name(&self) -> &str {
        "ibkr"
    }

    async fn fetch(&self, _creds: &BrokerCredentials) -> Result<Vec<RawTradeRecord>, BrokerError> {
        Err(BrokerError::Config(
            "IBKR requires IB Gateway running locally. Use CSV export instead for now.".to_string(),
        ))
    }
}
