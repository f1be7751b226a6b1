use crate::domain::entities::trade::Trade;
use crate::domain::error::DomainError;
use crate::domain::values::asset_class::AssetClass;
use crate::domain::values::direction::Direction;

#[derive(Debug, Default, Clone)]
pub struct TradeFilter {
    pub asset_type: Option<AssetClass>,
    pub direction: Option<Direction>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

pub trait TradeRepository: Send + Sync {
    /// Persists a batch atomically: either every non-duplicate row is written
    /// or none are. Each insert is individually idempotent — a row whose `id`
    /// or `(broker, broker_trade_id)` already exists is skipped, not an
    /// error. Returns how many rows were actually inserted.
    fn insert_batch(&self, trades: &[Trade]) -> Result<usize, DomainError>;

    fn get_trade(&self, id: &str) -> Result<Option<Trade>, DomainError>;

    /// Newest first.
    fn list_trades(&self, filter: &TradeFilter) -> Result<Vec<Trade>, DomainError>;

    fn update_trade(&self, trade: &Trade) -> Result<(), DomainError>;

    fn delete_trade(&self, id: &str) -> Result<(), DomainError>;
}
