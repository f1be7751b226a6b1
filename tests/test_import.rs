mod common;

use common::{record, setup, valid_row};
use serde_json::json;
use tradebook::application::import_batch::ImportSource;
use tradebook::domain::entities::trade::RawTradeRecord;
use tradebook::domain::ports::trade_repository::TradeFilter;
use tradebook::TradeBook;

fn keyed_rows(n: usize) -> Vec<RawTradeRecord> {
    (0..n)
        .map(|i| {
            let mut row = valid_row("AAPL");
            row.insert("id".to_string(), json!(format!("trade-{i}")));
            row
        })
        .collect()
}

#[test]
fn first_import_inserts_all_second_skips_all() {
    let tb = setup();

    let first = tb.confirm_import(keyed_rows(3)).unwrap();
    assert_eq!(first.inserted, 3);
    assert_eq!(first.skipped_duplicates, 0);
    assert!(first.rejected.is_empty());

    let second = tb.confirm_import(keyed_rows(3)).unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped_duplicates, 3);
    assert!(second.rejected.is_empty());

    assert_eq!(tb.list_trades(&TradeFilter::default()).unwrap().len(), 3);
}

#[test]
fn broker_trade_id_dedups_across_generated_ids() {
    let tb = setup();
    let source = ImportSource::Broker("binance".to_string());

    let mut row = valid_row("BTCUSDT");
    row.insert("broker".to_string(), json!("binance"));
    row.insert("broker_trade_id".to_string(), json!("28457"));

    let first = tb.import_rows(vec![row.clone()], source.clone()).unwrap();
    assert_eq!(first.inserted, 1);

    // Same fill again: ledger id is freshly generated but the
    // (broker, broker_trade_id) key already exists.
    let second = tb.import_rows(vec![row], source).unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped_duplicates, 1);
}

#[test]
fn invalid_row_is_isolated_and_the_rest_commits() {
    let tb = setup();
    let mut rows = keyed_rows(5);
    rows[2] = record(&[("entry_price", json!("oops"))]); // no symbol either

    let outcome = tb.confirm_import(rows).unwrap();
    assert_eq!(outcome.inserted + outcome.skipped_duplicates, 4);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].index, 2);
    assert!(!outcome.rejected[0].errors.is_empty());

    assert_eq!(tb.list_trades(&TradeFilter::default()).unwrap().len(), 4);
}

#[test]
fn the_three_buckets_sum_to_the_input_length() {
    let tb = setup();
    let mut rows = keyed_rows(4);
    rows.push(record(&[("symbol", json!("X"))])); // invalid: no prices
    rows.extend(keyed_rows(2)); // duplicates of trade-0 and trade-1

    let outcome = tb.confirm_import(rows).unwrap();
    assert_eq!(outcome.inserted, 4);
    assert_eq!(outcome.skipped_duplicates, 2);
    assert_eq!(outcome.rejected.len(), 1);
}

#[test]
fn invalid_rows_keep_their_full_error_list() {
    let tb = setup();
    let outcome = tb.confirm_import(vec![RawTradeRecord::new()]).unwrap();
    assert_eq!(outcome.inserted, 0);
    assert_eq!(
        outcome.rejected[0].errors,
        vec![
            "missing symbol",
            "invalid entry_price",
            "invalid exit_price",
            "invalid quantity",
        ]
    );
}

#[test]
fn broker_supplied_pnl_is_trusted_verbatim() {
    let tb = setup();
    let mut row = valid_row("EURUSD");
    // more precision than the derived-PnL rounding keeps
    row.insert("pnl".to_string(), json!(15.123456789012));
    row.insert("broker_trade_id".to_string(), json!("d-1"));

    tb.import_rows(vec![row], ImportSource::Broker("metatrader".to_string()))
        .unwrap();

    let trades = tb.list_trades(&TradeFilter::default()).unwrap();
    assert_eq!(trades[0].pnl, 15.123456789012);
}

#[test]
fn manual_and_csv_sources_never_trust_a_supplied_pnl() {
    let tb = setup();
    let mut row = valid_row("AAPL");
    row.insert("pnl".to_string(), json!(999999.0));

    tb.import_rows(vec![row], ImportSource::Manual).unwrap();

    let trades = tb.list_trades(&TradeFilter::default()).unwrap();
    assert_eq!(trades[0].pnl, 378.00);
    assert_eq!(trades[0].broker, "manual");
}

#[test]
fn broker_rows_without_pnl_get_it_computed() {
    let tb = setup();
    let mut row = valid_row("AAPL");
    row.insert("broker_trade_id".to_string(), json!("ord-9"));

    tb.import_rows(vec![row], ImportSource::Broker("alpaca".to_string()))
        .unwrap();

    let trades = tb.list_trades(&TradeFilter::default()).unwrap();
    assert_eq!(trades[0].pnl, 378.00);
    assert_eq!(trades[0].broker, "alpaca");
}

#[test]
fn retry_against_the_same_database_file_is_safe() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("ledger.db");
    let db_path = db_path.to_str().unwrap();

    {
        let tb = TradeBook::new(db_path).unwrap();
        let outcome = tb.confirm_import(keyed_rows(3)).unwrap();
        assert_eq!(outcome.inserted, 3);
    }

    // Upstream timed out and the caller retries the whole batch.
    let tb = TradeBook::new(db_path).unwrap();
    let retry = tb.confirm_import(keyed_rows(3)).unwrap();
    assert_eq!(retry.inserted, 0);
    assert_eq!(retry.skipped_duplicates, 3);
}
