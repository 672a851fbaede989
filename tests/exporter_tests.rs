// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use spendlog::models::{Category, NewTransaction, TxType};
use spendlog::store::{SqliteStore, TransactionStore};
use spendlog::{cli, commands::exporter, db};
use tempfile::tempdir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let store = SqliteStore::new(&conn);
    let a = NewTransaction::new("Groceries run", Decimal::new(4250, 2), TxType::Expense, Category::Food)
        .unwrap();
    let b = NewTransaction::quick_income(Decimal::new(1200, 0)).unwrap();
    store
        .insert(&a, Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap())
        .unwrap();
    store
        .insert(&b, Utc.with_ymd_and_hms(2025, 4, 2, 10, 0, 0).unwrap())
        .unwrap();
    conn
}

fn export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "spendlog",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    let (_, m) = matches.subcommand().unwrap();
    exporter::handle(conn, m)
}

#[test]
fn csv_export_oldest_first() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("tx.csv");
    export(&conn, "csv", path.to_str().unwrap()).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][2], "Groceries run");
    assert_eq!(&records[0][3], "expense");
    assert_eq!(&records[0][5], "42.50");
    assert_eq!(&records[1][4], "Salary");
    assert_eq!(&records[0][1], "2025-04-01T10:00:00.000Z");
}

#[test]
fn json_export_round_trips_models() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("tx.json");
    export(&conn, "json", path.to_str().unwrap()).unwrap();

    let body = std::fs::read_to_string(&path).unwrap();
    let items: Vec<spendlog::models::Transaction> = serde_json::from_str(&body).unwrap();
    assert_eq!(items, {
        let mut v = SqliteStore::new(&conn).list().unwrap();
        v.reverse();
        v
    });
}

#[test]
fn unknown_format_is_an_error() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("tx.xml");
    assert!(export(&conn, "xml", path.to_str().unwrap()).is_err());
}
