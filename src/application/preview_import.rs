use crate::domain::entities::trade::RawTradeRecord;
use crate::domain::error::DomainError;
use crate::domain::pipeline::coercer::{coerce, CandidateTrade};
use crate::domain::pipeline::normalizer::normalize_fields;
use crate::domain::pipeline::validator::validate;
use crate::domain::values::pnl::calculate_pnl;
use crate::infrastructure::csv::parse_csv_text;
use serde::Serialize;

/// One previewed row: its coerced fields, the PnL it would be stored with,
/// and any validation errors. Rows with errors keep their detail so the
/// caller can render a fix-your-data view.
#[derive(Debug, Serialize)]
pub struct PreviewRow {
    pub fields: CandidateTrade,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnl: Option<f64>,
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportPreview {
    pub total: usize,
    pub valid_count: usize,
    pub error_count: usize,
    pub rows: Vec<PreviewRow>,
}

/// Parses CSV text and runs the pipeline without persisting anything.
pub struct PreviewImportUseCase;

impl PreviewImportUseCase {
    pub fn execute(&self, csv_text: &str) -> Result<ImportPreview, DomainError> {
        let records = parse_csv_text(csv_text)?;
        Ok(preview_records(&records))
    }
}

pub(crate) fn preview_records(records: &[RawTradeRecord]) -> ImportPreview {
    let rows: Vec<PreviewRow> = records
        .iter()
        .map(|raw| {
            let candidate = coerce(&normalize_fields(raw));
            let errors = validate(&candidate);
            let pnl = errors.is_empty().then(|| {
                calculate_pnl(
                    candidate.entry_price,
                    candidate.exit_price,
                    candidate.quantity,
                    candidate.direction,
                    candidate.commission,
                )
            });
            PreviewRow {
                fields: candidate,
                pnl,
                errors,
            }
        })
        .collect();

    let error_count = rows.iter().filter(|r| !r.errors.is_empty()).count();
    ImportPreview {
        total: rows.len(),
        valid_count: rows.len() - error_count,
        error_count,
        rows,
    }
}
