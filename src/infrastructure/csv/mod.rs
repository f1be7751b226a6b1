//! CSV upload parsing. Only the subset the import pipeline needs: comma
//! delimiter, double-quoted fields with embedded commas, first line is the
//! header. Header aliasing and value coercion happen downstream in the
//! pipeline, so every cell leaves here as a plain string keyed by its raw
//! header.

use crate::domain::entities::trade::RawTradeRecord;
use crate::domain::error::DomainError;
use serde_json::Value;

/// Parses uploaded CSV text into raw records. Fails before any row
/// processing when the input has fewer than a header plus one data row.
pub fn parse_csv_text(text: &str) -> Result<Vec<RawTradeRecord>, DomainError> {
    let trimmed = text.trim();
    if trimmed.lines().filter(|l| !l.trim().is_empty()).count() < 2 {
        return Err(DomainError::InvalidInput(
            "CSV needs a header row and at least one data row".to_string(),
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(trimmed.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DomainError::Parse(format!("Unreadable CSV header: {e}")))?
        .clone();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| DomainError::Parse(format!("Unreadable CSV row: {e}")))?;
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let mut record = RawTradeRecord::new();
        for (i, header) in headers.iter().enumerate() {
            let cell = row.get(i).unwrap_or("");
            record.insert(header.to_string(), Value::String(cell.to_string()));
        }
        records.push(record);
    }
    Ok(records)
}

/// Canonical column names plus one sample row, served to callers as a
/// source-format guide.
pub const CSV_TEMPLATE: &str = "symbol,asset_type,direction,entry_price,exit_price,quantity,entry_date,exit_date,strategy,commission\n\
AAPL,stock,long,178.50,182.30,100,2025-01-10,2025-01-10,Breakout,2.00\n";
