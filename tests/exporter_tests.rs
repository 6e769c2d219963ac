// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::commands::{doctor, exporter, stats};
use pocketledger::models::{BuiltinCategory, Expense, Income, IncomeSource};
use pocketledger::month::YearMonth;
use pocketledger::store::{CatalogStore, ExpenseStore, IncomeStore, SqliteStore};
use rusqlite::params;
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::tempdir;

fn ym(y: i32, m: u32) -> YearMonth {
    YearMonth::new(y, m).unwrap()
}

fn seeded() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    let at = |m: u32, d: u32| {
        NaiveDate::from_ymd_opt(2025, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    };
    store
        .add_expense(
            Expense::new("12.34".parse().unwrap(), BuiltinCategory::Groceries, at(1, 2))
                .with_merchant("Corner Shop")
                .with_note("weekly run"),
        )
        .unwrap();
    store
        .add_expense(Expense::new(Decimal::from(5), BuiltinCategory::Transport, at(2, 3)))
        .unwrap();
    store
        .add_income(Income::new(Decimal::from(900), IncomeSource::Freelance, at(2, 1)))
        .unwrap();
    store
}

#[test]
fn export_json_covers_the_month_range() {
    let store = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.json");
    let n = exporter::export_transactions(&store, ym(2025, 1), ym(2025, 2), "json", &out).unwrap();
    assert_eq!(n, 3);

    let v: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr[0]["title"], "Transport");
    assert_eq!(arr[1]["kind"], "income");
    assert_eq!(arr[1]["amount"], "900.00");
    assert_eq!(arr[2]["title"], "Corner Shop");
    assert_eq!(arr[2]["subtitle"], "Groceries · weekly run");
    assert_eq!(arr[2]["amount"], "-12.34");
}

#[test]
fn export_csv_single_month() {
    let store = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    let n = exporter::export_transactions(&store, ym(2025, 1), ym(2025, 1), "csv", &out).unwrap();
    assert_eq!(n, 1);

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "id");
    assert_eq!(&headers[5], "amount");
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][1], "expense");
    assert_eq!(&rows[0][3], "Corner Shop");
}

#[test]
fn export_rejects_reversed_range_and_unknown_format() {
    let store = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.out");
    assert!(exporter::export_transactions(&store, ym(2025, 2), ym(2025, 1), "csv", &out).is_err());
    assert!(exporter::export_transactions(&store, ym(2025, 1), ym(2025, 1), "xml", &out).is_err());
}

#[test]
fn doctor_flags_damaged_rows() {
    let store = seeded();
    let pets = store.add_category("Pets", None, None).unwrap();
    store
        .add_expense(Expense::new(
            Decimal::from(7),
            pocketledger::models::ExpenseCategory::Custom(pets),
            NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        ))
        .unwrap();
    store.remove_category(pets).unwrap();
    let conn = store.connection();
    conn.execute(
        "INSERT INTO incomes(date, amount, source) VALUES (?1, ?2, ?3)",
        params!["2025-03-02", "abc", "lottery"],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO expenses(date, amount, category) VALUES (?1, ?2, ?3)",
        params!["2099-01-01", "-3", "food"],
    )
    .unwrap();

    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let issues: Vec<String> = doctor::check(conn, today)
        .unwrap()
        .into_iter()
        .map(|r| r[0].clone())
        .collect();
    for expected in [
        "dangling_category",
        "bad_amount",
        "unknown_source",
        "non_positive_amount",
        "future_date",
    ] {
        assert!(issues.iter().any(|i| i == expected), "missing {expected}");
    }

    let clean = seeded();
    assert!(doctor::check(clean.connection(), today).unwrap().is_empty());
}

#[test]
fn stats_count_records_and_span() {
    let store = seeded();
    let s = stats::collect(&store).unwrap();
    assert_eq!(s.expenses, 2);
    assert_eq!(s.incomes, 1);
    assert_eq!(s.first_date.as_deref(), Some("2025-01-02"));
    assert_eq!(s.last_date.as_deref(), Some("2025-02-03"));
}
