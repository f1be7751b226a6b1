use crate::application::import_batch::{build_trade, ImportSource};
use crate::domain::entities::trade::{RawTradeRecord, Trade};
use crate::domain::error::DomainError;
use crate::domain::pipeline::coercer::coerce;
use crate::domain::pipeline::normalizer::normalize_fields;
use crate::domain::pipeline::validator::validate;
use crate::domain::ports::trade_repository::{TradeFilter, TradeRepository};
use std::sync::Arc;

/// Single-record operations against the ledger. Adds run the same pipeline
/// as bulk import; edits re-run the PnL calculator over the merged fields.
pub struct TradeUseCase {
    repo: Arc<dyn TradeRepository>,
}

impl TradeUseCase {
    pub fn new(repo: Arc<dyn TradeRepository>) -> Self {
        Self { repo }
    }

    pub fn add(&self, record: RawTradeRecord) -> Result<Trade, DomainError> {
        let candidate = coerce(&normalize_fields(&record));
        let errors = validate(&candidate);
        if !errors.is_empty() {
            return Err(DomainError::InvalidInput(errors.join(", ")));
        }
        let trade = build_trade(candidate, &ImportSource::Manual);
        let inserted = self.repo.insert_batch(&[trade.clone()])?;
        if inserted == 0 {
            return Err(DomainError::InvalidInput(format!(
                "Trade already exists: {}",
                trade.id
            )));
        }
        Ok(trade)
    }

    pub fn get(&self, id: &str) -> Result<Trade, DomainError> {
        self.repo
            .get_trade(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Trade not found: {id}")))
    }

    pub fn list(&self, filter: &TradeFilter) -> Result<Vec<Trade>, DomainError> {
        self.repo.list_trades(filter)
    }

    /// Merges the patch over the stored record, re-validates, and recomputes
    /// PnL from the merged fields. Provenance (`id`, `broker`,
    /// `broker_trade_id`, `created_at`) never changes on edit.
    pub fn update(&self, id: &str, patch: RawTradeRecord) -> Result<Trade, DomainError> {
        let existing = self.get(id)?;

        let mut record = trade_to_record(&existing)?;
        for (key, value) in normalize_fields(&patch) {
            record.insert(key, value);
        }

        let candidate = coerce(&record);
        let errors = validate(&candidate);
        if !errors.is_empty() {
            return Err(DomainError::InvalidInput(errors.join(", ")));
        }

        let mut updated = build_trade(candidate, &ImportSource::Manual);
        updated.id = existing.id.clone();
        updated.broker = existing.broker.clone();
        updated.broker_trade_id = existing.broker_trade_id.clone();
        updated.created_at = existing.created_at;

        self.repo.update_trade(&updated)?;
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.repo.delete_trade(id)
    }
}

fn trade_to_record(trade: &Trade) -> Result<RawTradeRecord, DomainError> {
    match serde_json::to_value(trade) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err(DomainError::Parse("Trade did not serialize to an object".to_string())),
        Err(e) => Err(DomainError::Parse(e.to_string())),
    }
}
