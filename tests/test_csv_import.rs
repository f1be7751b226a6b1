mod common;

use common::setup;
use tradebook::domain::values::asset_class::AssetClass;
use tradebook::domain::values::direction::Direction;
use tradebook::TradeBook;

const HEADER: &str =
    "symbol,asset_type,direction,entry_price,exit_price,quantity,entry_date,exit_date,strategy,commission";

#[test]
fn preview_reports_counts_and_row_detail() {
    let tb = setup();
    let csv = format!(
        "{HEADER}\nAAPL,stock,long,178.50,182.30,100,,, ,2.00\nBAD,stock,long,abc,182.30,100,,,,\n"
    );

    let preview = tb.preview_import(&csv).unwrap();
    assert_eq!(preview.total, 2);
    assert_eq!(preview.valid_count, 1);
    assert_eq!(preview.error_count, 1);

    let good = &preview.rows[0];
    assert_eq!(good.fields.entry_price, 178.50);
    assert_eq!(good.fields.exit_price, 182.30);
    assert_eq!(good.fields.quantity, 100.0);
    assert_eq!(good.fields.commission, 2.00);
    assert_eq!(good.fields.strategy, None); // whitespace-only cell
    assert_eq!(good.pnl, Some(378.00));
    assert!(good.errors.is_empty());

    let bad = &preview.rows[1];
    assert_eq!(bad.errors, vec!["invalid entry_price"]);
    assert_eq!(bad.pnl, None);
}

#[test]
fn short_direction_inverts_the_pnl() {
    let tb = setup();
    let csv = format!("{HEADER}\nAAPL,stock,short,178.50,182.30,100,,, ,2.00\n");
    let preview = tb.preview_import(&csv).unwrap();
    assert_eq!(preview.rows[0].pnl, Some(-382.00));
}

#[test]
fn aliased_headers_normalize_identically_to_canonical_ones() {
    let tb = setup();
    let aliased = tb
        .preview_import("Ticker,Side,Qty,Entry,Exit\nAAPL,buy,100,178.50,182.30\n")
        .unwrap();
    let canonical = tb
        .preview_import("symbol,direction,quantity,entry_price,exit_price\nAAPL,long,100,178.50,182.30\n")
        .unwrap();

    let a = &aliased.rows[0].fields;
    let c = &canonical.rows[0].fields;
    assert_eq!(a.symbol, c.symbol);
    assert_eq!(a.direction, c.direction);
    assert_eq!(a.quantity, c.quantity);
    assert_eq!(a.entry_price, c.entry_price);
    assert_eq!(aliased.rows[0].pnl, canonical.rows[0].pnl);
}

#[test]
fn preview_persists_nothing() {
    let tb = setup();
    let csv = format!("{HEADER}\nAAPL,stock,long,178.50,182.30,100,,,,2.00\n");
    tb.preview_import(&csv).unwrap();
    assert!(tb.list_trades(&Default::default()).unwrap().is_empty());
}

#[test]
fn import_csv_persists_valid_rows_as_csv_import() {
    let tb = setup();
    let csv = format!(
        "{HEADER}\nAAPL,equities,buy,\"$1,178.50\",\"1,182.30\",100,2025-01-10,2025-01-10,Breakout,2.00"
    );
    let outcome = tb.import_csv(&csv).unwrap();
    assert_eq!(outcome.inserted, 1);

    let trades = tb.list_trades(&Default::default()).unwrap();
    assert_eq!(trades[0].symbol, "AAPL");
    assert_eq!(trades[0].broker, "csv_import");
    assert_eq!(trades[0].asset_type, AssetClass::Stock);
    assert_eq!(trades[0].direction, Direction::Long);
    // currency formatting stripped before parsing
    assert_eq!(trades[0].entry_price, 1178.50);
    assert_eq!(trades[0].exit_price, 1182.30);
}

#[test]
fn infinite_prices_are_rejected_not_persisted() {
    let tb = setup();
    let csv = format!("{HEADER}\nAAPL,stock,long,inf,182.30,100,,,,\n");
    let outcome = tb.import_csv(&csv).unwrap();
    assert_eq!(outcome.inserted, 0);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].errors, vec!["invalid entry_price"]);
    assert!(tb.list_trades(&Default::default()).unwrap().is_empty());
}

#[test]
fn csv_with_only_a_header_is_rejected_up_front() {
    let tb = setup();
    let err = tb.preview_import("symbol,quantity\n").unwrap_err();
    assert!(err.to_string().contains("header row"));
    let err = tb.import_csv("").unwrap_err();
    assert!(err.to_string().contains("header row"));
}

#[test]
fn symbol_is_upper_cased_on_persistence() {
    let tb = setup();
    let csv = format!("{HEADER}\naapl,stock,long,178.50,182.30,100,,,,\n");
    tb.import_csv(&csv).unwrap();
    assert_eq!(tb.list_trades(&Default::default()).unwrap()[0].symbol, "AAPL");
}

#[test]
fn the_template_round_trips_through_preview_cleanly() {
    let tb = setup();
    let preview = tb.preview_import(TradeBook::csv_template()).unwrap();
    assert_eq!(preview.total, 1);
    assert_eq!(preview.valid_count, 1);
    assert_eq!(preview.error_count, 0);
}
