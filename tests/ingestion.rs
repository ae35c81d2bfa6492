use std::{fs, io::Write, path::PathBuf};

use chrono::NaiveDate;
use swapmatch::catalog::Catalog;
use swapmatch::codes::{
    ActionType, BlockTradeFlag, Currency, PaymentFrequency, ReferenceRate, TransactionType,
    VenueType,
};
use tempfile::TempDir;

const HEADER_ROW: &str = "Dissemination ID,Action,Transaction Type,Block Trade Election Indicator,\
Execution Venue Type,Execution Timestamp,Effective Date,Expiration Date,Notional Currency 1,\
Notional Amount 1,Fixed Rate 1,Leg 1 - Floating Rate Index,Payment Frequency Period 1,\
Payment Frequency Period 2,Ignored Extra Column";

fn write_disclosures(rows: &[&str]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("disclosures.csv");
    let mut file = fs::File::create(&path).expect("create disclosure file");
    writeln!(file, "{HEADER_ROW}").expect("header row");
    for row in rows {
        writeln!(file, "{row}").expect("data row");
    }
    (dir, path)
}

fn load(rows: &[&str]) -> Catalog {
    let (_dir, path) = write_disclosures(rows);
    Catalog::load(&path, ',', None).expect("load catalog")
}

#[test]
fn full_row_populates_every_typed_attribute() {
    let catalog = load(&[
        "101,NEW,Trade,N,ON,2022-09-10T20:15:56,2022-09-12,2032-09-12,USD,\
\"250,000,000\",2.71,USD SOFR COMPOUND,3M,6M,whatever",
    ]);
    assert_eq!(catalog.len(), 1);
    let swap = &catalog.records()[0];
    assert_eq!(swap.id, 101);
    assert_eq!(swap.action, ActionType::New);
    assert_eq!(swap.transaction, TransactionType::Trade);
    assert_eq!(swap.block_trade, BlockTradeFlag::No);
    assert_eq!(swap.venue, VenueType::On);
    assert_eq!(swap.start_date, NaiveDate::from_ymd_opt(2022, 9, 12));
    assert_eq!(swap.end_date, NaiveDate::from_ymd_opt(2032, 9, 12));
    assert_eq!(
        swap.trade_time,
        NaiveDate::from_ymd_opt(2022, 9, 10).unwrap().and_hms_opt(20, 15, 56)
    );
    assert_eq!(swap.currency, Currency::Usd);
    assert_eq!(swap.notional, 250_000_000.0);
    assert_eq!(swap.fixed_rate, 2.71);
    // leg 1 carried the floating index, so leg 1's frequency floats
    assert_eq!(swap.ref_rate, ReferenceRate::SofrCompound);
    assert_eq!(swap.float_pay_freq, PaymentFrequency::Quarterly);
    assert_eq!(swap.fixed_pay_freq, PaymentFrequency::Semiannual);
}

#[test]
fn empty_fixed_rate_field_leaves_sentinel_and_keeps_the_record() {
    let catalog = load(&[
        "102,NEW,Trade,N,OFF,2022-09-10T20:15:56,2022-09-12,2032-09-12,USD,1000000,,LIBOR,1M,1Y,x",
    ]);
    assert_eq!(catalog.len(), 1);
    let swap = &catalog.records()[0];
    assert_eq!(swap.fixed_rate, 0.0);
    assert_eq!(swap.notional, 1_000_000.0);
    assert_eq!(swap.ref_rate, ReferenceRate::Libor);
}

#[test]
fn short_lines_are_tolerated() {
    let catalog = load(&["103,NEW"]);
    assert_eq!(catalog.len(), 1);
    let swap = &catalog.records()[0];
    assert_eq!(swap.id, 103);
    assert_eq!(swap.action, ActionType::New);
    assert_eq!(swap.start_date, None);
    assert_eq!(swap.notional, 0.0);
    assert!(!swap.ref_rate.is_recognized());
}

#[test]
fn blank_lines_are_skipped() {
    let catalog = load(&["104,NEW", "", "105,CANCEL"]);
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.records()[0].id, 104);
    assert_eq!(catalog.records()[1].id, 105);
    assert_eq!(catalog.records()[1].action, ActionType::Cancel);
}

#[test]
fn record_limit_caps_the_catalog() {
    let (_dir, path) = write_disclosures(&["1,NEW", "2,NEW", "3,NEW"]);
    let catalog = Catalog::load(&path, ',', Some(2)).expect("load catalog");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.records()[1].id, 2);
}

#[test]
fn unrecognized_codes_keep_their_raw_text() {
    let catalog = load(&["106,AMEND,Novation,maybe,SEF"]);
    let swap = &catalog.records()[0];
    assert_eq!(swap.action, ActionType::Unrecognized("AMEND".to_string()));
    assert_eq!(
        swap.transaction,
        TransactionType::Unrecognized("Novation".to_string())
    );
    assert_eq!(
        swap.block_trade,
        BlockTradeFlag::Unrecognized("maybe".to_string())
    );
    assert_eq!(swap.venue, VenueType::Unrecognized("SEF".to_string()));
}

#[test]
fn empty_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("empty.csv");
    fs::File::create(&path).expect("create empty file");
    assert!(Catalog::load(&path, ',', None).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nope.csv");
    assert!(Catalog::load(&path, ',', None).is_err());
}

#[test]
fn malformed_date_width_fails_the_load() {
    let (_dir, path) = write_disclosures(&[
        "107,NEW,Trade,N,ON,2022-09-10T20:15:56,Sept 12 2022,2032-09-12",
    ]);
    assert!(Catalog::load(&path, ',', None).is_err());
}
