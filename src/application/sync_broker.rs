use crate::application::import_batch::{ImportBatchUseCase, ImportSource};
use crate::domain::error::DomainError;
use crate::infrastructure::brokers::{adapter_for, BrokerAdapter, BrokerCredentials, BrokerError};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SyncOutcome {
    pub broker: String,
    pub imported: usize,
    pub skipped_duplicates: usize,
}

/// Fetches trade history from one broker, then feeds it through the import
/// pipeline. The fetch completes fully before the import transaction begins,
/// so an adapter failure never leaves a half-applied batch.
pub struct SyncBrokerUseCase {
    importer: ImportBatchUseCase,
}

impl SyncBrokerUseCase {
    pub fn new(importer: ImportBatchUseCase) -> Self {
        Self { importer }
    }

    pub async fn execute(
        &self,
        broker_name: &str,
        creds: &BrokerCredentials,
    ) -> Result<SyncOutcome, DomainError> {
        let adapter = adapter_for(broker_name).map_err(broker_to_domain)?;
        self.execute_with_adapter(adapter.as_ref(), creds).await
    }

    /// Injection seam for tests and callers that already hold an adapter.
    pub async fn execute_with_adapter(
        &self,
        adapter: &dyn BrokerAdapter,
        creds: &BrokerCredentials,
    ) -> Result<SyncOutcome, DomainError> {
        let rows = adapter.fetch(creds).await.map_err(broker_to_domain)?;
        log::info!("{}: fetched {} raw trades", adapter.name(), rows.len());

        let source = ImportSource::Broker(adapter.name().to_string());
        let outcome = self.importer.execute(rows, &source)?;
        log::info!(
            "{}: imported {}, skipped {} duplicates, rejected {}",
            adapter.name(),
            outcome.inserted,
            outcome.skipped_duplicates,
            outcome.rejected.len()
        );

        Ok(SyncOutcome {
            broker: adapter.name().to_string(),
            imported: outcome.inserted,
            skipped_duplicates: outcome.skipped_duplicates,
        })
    }
}

fn broker_to_domain(err: BrokerError) -> DomainError {
    DomainError::Broker(err.to_string())
}
