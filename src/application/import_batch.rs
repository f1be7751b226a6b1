use crate::domain::entities::trade::{RawTradeRecord, Trade};
use crate::domain::error::DomainError;
use crate::domain::pipeline::coercer::{coerce, CandidateTrade};
use crate::domain::pipeline::normalizer::normalize_fields;
use crate::domain::pipeline::validator::validate;
use crate::domain::ports::trade_repository::TradeRepository;
use crate::domain::values::pnl::calculate_pnl;
use serde::Serialize;
use std::sync::Arc;

/// Provenance of a batch. Only broker sources may carry a pre-computed PnL;
/// every other source has it derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    Manual,
    CsvImport,
    Broker(String),
}

impl ImportSource {
    fn default_broker_tag(&self) -> &str {
        match self {
            ImportSource::Manual => "manual",
            ImportSource::CsvImport => "csv_import",
            ImportSource::Broker(name) => name,
        }
    }
}

/// A row that failed validation, preserved with its full rule list so the
/// caller can surface it.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRow {
    /// Position of the row in the submitted batch.
    pub index: usize,
    pub record: RawTradeRecord,
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub inserted: usize,
    pub skipped_duplicates: usize,
    pub rejected: Vec<RejectedRow>,
}

pub struct ImportBatchUseCase {
    repo: Arc<dyn TradeRepository>,
}

impl ImportBatchUseCase {
    pub fn new(repo: Arc<dyn TradeRepository>) -> Self {
        Self { repo }
    }

    /// Runs every raw row through the pipeline and persists the valid subset
    /// in one transaction. Invalid rows are collected, duplicate rows are
    /// counted skips; `inserted + skipped_duplicates + rejected.len()` always
    /// equals the input length.
    pub fn execute(
        &self,
        rows: Vec<RawTradeRecord>,
        source: &ImportSource,
    ) -> Result<ImportOutcome, DomainError> {
        let mut valid = Vec::new();
        let mut rejected = Vec::new();

        for (index, raw) in rows.into_iter().enumerate() {
            let record = normalize_fields(&raw);
            let candidate = coerce(&record);
            let errors = validate(&candidate);
            if errors.is_empty() {
                valid.push(build_trade(candidate, source));
            } else {
                rejected.push(RejectedRow {
                    index,
                    record,
                    errors,
                });
            }
        }

        let inserted = self.repo.insert_batch(&valid)?;
        Ok(ImportOutcome {
            inserted,
            skipped_duplicates: valid.len() - inserted,
            rejected,
        })
    }
}

/// Assembles the canonical record from a validated candidate. Must only be
/// called once `validate` returned no errors.
pub(crate) fn build_trade(candidate: CandidateTrade, source: &ImportSource) -> Trade {
    let computed = calculate_pnl(
        candidate.entry_price,
        candidate.exit_price,
        candidate.quantity,
        candidate.direction,
        candidate.commission,
    );
    // Broker fills may reflect fees the pipeline cannot see; their supplied
    // PnL wins and is stored verbatim. Everything else is derived.
    let pnl = match source {
        ImportSource::Broker(_) => candidate.pnl.unwrap_or(computed),
        _ => computed,
    };

    Trade {
        id: candidate
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        symbol: candidate.symbol.to_uppercase(),
        asset_type: candidate.asset_type,
        direction: candidate.direction,
        entry_price: candidate.entry_price,
        exit_price: candidate.exit_price,
        quantity: candidate.quantity,
        entry_date: candidate.entry_date,
        exit_date: candidate.exit_date,
        stop_loss: candidate.stop_loss,
        take_profit: candidate.take_profit,
        commission: candidate.commission,
        strategy: candidate.strategy,
        notes: candidate.notes,
        market_conditions: candidate.market_conditions,
        pnl,
        broker: candidate
            .broker
            .unwrap_or_else(|| source.default_broker_tag().to_string()),
        broker_trade_id: candidate.broker_trade_id,
        created_at: chrono::Utc::now(),
    }
}
