pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::import_batch::{ImportBatchUseCase, ImportOutcome, ImportSource};
use crate::application::preview_import::{ImportPreview, PreviewImportUseCase};
use crate::application::stats::{StatsUseCase, TradeStats};
use crate::application::sync_broker::{SyncBrokerUseCase, SyncOutcome};
use crate::application::trades::TradeUseCase;
use crate::domain::entities::trade::{RawTradeRecord, Trade};
use crate::domain::error::DomainError;
use crate::domain::ports::trade_repository::{TradeFilter, TradeRepository};
use crate::infrastructure::brokers::{BrokerAdapter, BrokerCredentials};
use crate::infrastructure::csv::CSV_TEMPLATE;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::trade_repo::SqliteTradeRepo;
use rusqlite::Connection;
use std::sync::Arc;

/// Facade wiring the ledger use-cases together over one repository.
pub struct TradeBook {
    import_uc: ImportBatchUseCase,
    preview_uc: PreviewImportUseCase,
    sync_uc: SyncBrokerUseCase,
    trade_uc: TradeUseCase,
    stats_uc: StatsUseCase,
}

impl TradeBook {
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;

        let repo: Arc<dyn TradeRepository> = Arc::new(SqliteTradeRepo::new(conn));
        Ok(Self::with_repo(repo))
    }

    pub fn with_repo(repo: Arc<dyn TradeRepository>) -> Self {
        Self {
            import_uc: ImportBatchUseCase::new(repo.clone()),
            preview_uc: PreviewImportUseCase,
            sync_uc: SyncBrokerUseCase::new(ImportBatchUseCase::new(repo.clone())),
            trade_uc: TradeUseCase::new(repo.clone()),
            stats_uc: StatsUseCase::new(repo),
        }
    }

    /// Parses CSV text and runs the pipeline without persisting, so a caller
    /// can render a confirmation view.
    pub fn preview_import(&self, csv_text: &str) -> Result<ImportPreview, DomainError> {
        self.preview_uc.execute(csv_text)
    }

    /// Persists previously previewed (caller-filtered) rows as `csv_import`.
    pub fn confirm_import(&self, rows: Vec<RawTradeRecord>) -> Result<ImportOutcome, DomainError> {
        self.import_uc.execute(rows, &ImportSource::CsvImport)
    }

    /// Parse-and-persist in one step.
    pub fn import_csv(&self, csv_text: &str) -> Result<ImportOutcome, DomainError> {
        let rows = infrastructure::csv::parse_csv_text(csv_text)?;
        self.import_uc.execute(rows, &ImportSource::CsvImport)
    }

    /// Bulk entry of already-parsed raw rows.
    pub fn import_rows(
        &self,
        rows: Vec<RawTradeRecord>,
        source: ImportSource,
    ) -> Result<ImportOutcome, DomainError> {
        self.import_uc.execute(rows, &source)
    }

    pub async fn sync_broker(
        &self,
        broker_name: &str,
        creds: &BrokerCredentials,
    ) -> Result<SyncOutcome, DomainError> {
        self.sync_uc.execute(broker_name, creds).await
    }

    pub async fn sync_with_adapter(
        &self,
        adapter: &dyn BrokerAdapter,
        creds: &BrokerCredentials,
    ) -> Result<SyncOutcome, DomainError> {
        self.sync_uc.execute_with_adapter(adapter, creds).await
    }

    pub fn add_trade(&self, record: RawTradeRecord) -> Result<Trade, DomainError> {
        self.trade_uc.add(record)
    }

    pub fn get_trade(&self, id: &str) -> Result<Trade, DomainError> {
        self.trade_uc.get(id)
    }

    pub fn list_trades(&self, filter: &TradeFilter) -> Result<Vec<Trade>, DomainError> {
        self.trade_uc.list(filter)
    }

    pub fn update_trade(&self, id: &str, patch: RawTradeRecord) -> Result<Trade, DomainError> {
        self.trade_uc.update(id, patch)
    }

    pub fn delete_trade(&self, id: &str) -> Result<(), DomainError> {
        self.trade_uc.delete(id)
    }

    pub fn stats(&self) -> Result<TradeStats, DomainError> {
        self.stats_uc.summary()
    }

    /// Static CSV template exposing the canonical column names.
    pub fn csv_template() -> &'static str {
        CSV_TEMPLATE
    }
}
