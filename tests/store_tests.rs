// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use chrono::NaiveDate;
use pocketledger::Error;
use pocketledger::config::Config;
use pocketledger::lookup::{FALLBACK_CATEGORY, parse_color};
use pocketledger::models::{BuiltinCategory, Expense, ExpenseCategory, Income, IncomeSource};
use pocketledger::month::YearMonth;
use pocketledger::notify::{Change, Notifier, StoreEvent};
use pocketledger::store::{CatalogStore, ExpenseStore, IncomeStore, SqliteStore};
use pocketledger::unified::unified_transactions;
use rusqlite::params;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn ym(y: i32, m: u32) -> YearMonth {
    YearMonth::new(y, m).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn on(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap()
}

#[test]
fn month_query_includes_bare_dates_on_both_edges() {
    let store = SqliteStore::open_in_memory().unwrap();
    let conn = store.connection();
    for (date, amount) in [
        ("2025-01-01", "1"),
        ("2025-01-31 23:59:59", "2"),
        ("2024-12-31 23:59:59", "40"),
        ("2025-02-01", "80"),
    ] {
        conn.execute(
            "INSERT INTO expenses(date, amount, category) VALUES (?1, ?2, 'food')",
            params![date, amount],
        )
        .unwrap();
    }
    let s = store.expense_summary(ym(2025, 1)).unwrap();
    assert_eq!(s.count, 2);
    assert_eq!(s.total, dec("3"));
}

#[test]
fn expenses_round_trip_with_tags() {
    let store = SqliteStore::open_in_memory().unwrap();
    let work = store.add_tag("work", Some("#00ff00")).unwrap();
    let lunch = store.add_tag("lunch", None).unwrap();
    let e = Expense::new(dec("12.40"), BuiltinCategory::Food, on(2025, 3, 4))
        .with_merchant("Deli")
        .with_tags([work, lunch]);
    let id = store.add_expense(e).unwrap();

    let mut found = store.find_expense(id).unwrap().unwrap();
    assert_eq!(found.amount, dec("12.40"));
    assert_eq!(found.merchant.as_deref(), Some("Deli"));
    assert_eq!(found.tags, BTreeSet::from([work, lunch]));
    assert_eq!(found.date, on(2025, 3, 4));

    found.tags.remove(&lunch);
    found.amount = dec("15");
    store.update_expense(&found).unwrap();
    let again = store.find_expense(id).unwrap().unwrap();
    assert_eq!(again.tags, BTreeSet::from([work]));
    assert_eq!(again.amount, dec("15"));

    let catalog = store.catalog().unwrap();
    assert_eq!(catalog.tag(work).unwrap().color.as_deref(), Some("#00FF00"));
    assert!(store.find_expense(id + 100).unwrap().is_none());
}

#[test]
fn invalid_input_is_rejected() {
    let store = SqliteStore::open_in_memory().unwrap();
    let zero = Expense::new(Decimal::ZERO, BuiltinCategory::Other, on(2025, 3, 1));
    assert!(matches!(
        store.add_expense(zero),
        Err(Error::NonPositiveAmount(_))
    ));
    let negative = Income::new(dec("-5"), IncomeSource::Gift, on(2025, 3, 1));
    assert!(store.add_income(negative).is_err());
    assert!(matches!(store.add_tag("  ", None), Err(Error::EmptyName("tag"))));
    assert!(matches!(
        store.add_category("Pets", None, Some("red")),
        Err(Error::InvalidColor(_))
    ));
    store.add_category("Pets", None, None).unwrap();
    assert!(store.add_category("pets", None, None).is_err());
    assert!(matches!(
        store.delete_expense(42),
        Err(Error::NotFound { id: 42, .. })
    ));
    assert!(store.remove_tag(42).is_err());
}

#[test]
fn mutations_notify_subscribers() {
    let store = SqliteStore::open_in_memory().unwrap();
    let seen: Rc<RefCell<Vec<StoreEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _expenses = store.subscribe_expenses(Box::new(move |e: &StoreEvent| sink.borrow_mut().push(*e)));
    let sink = Rc::clone(&seen);
    let incomes = store.subscribe_incomes(Box::new(move |e: &StoreEvent| sink.borrow_mut().push(*e)));

    let tag = store.add_tag("trip", None).unwrap();
    let id = store
        .add_expense(Expense::new(dec("3"), BuiltinCategory::Travel, on(2025, 5, 2)).with_tags([tag]))
        .unwrap();
    store.remove_tag(tag).unwrap();
    let inc = store
        .add_income(Income::new(dec("10"), IncomeSource::Refund, on(2025, 5, 3)))
        .unwrap();
    incomes.cancel();
    store.delete_income(inc).unwrap();
    store.delete_expense(id).unwrap();

    let changes: Vec<(Change, i64)> = seen.borrow().iter().map(|e| (e.change, e.id)).collect();
    assert_eq!(
        changes,
        vec![
            (Change::Inserted, id),
            (Change::Updated, id),
            (Change::Inserted, inc),
            (Change::Deleted, id),
        ]
    );
    assert!(store.find_expense(id).unwrap().is_none());
}

#[test]
fn removed_category_leaves_expenses_uncategorized() {
    let store = SqliteStore::open_in_memory().unwrap();
    let pets = store.add_category("Pets", Some("🐾"), None).unwrap();
    store
        .add_expense(Expense::new(dec("25"), ExpenseCategory::Custom(pets), on(2025, 6, 9)))
        .unwrap();
    store.remove_category(pets).unwrap();

    let s = store.expense_summary(ym(2025, 6)).unwrap();
    assert_eq!(s.records[0].category, ExpenseCategory::Custom(pets));
    let catalog = store.catalog().unwrap();
    assert!(catalog.custom_category(pets).is_none());
    let items = unified_transactions(&s.records, &[], &catalog);
    assert_eq!(items[0].title, FALLBACK_CATEGORY);
    assert!(store.remove_category(pets).is_err());
}

#[test]
fn settings_are_validated_and_persisted() {
    let store = SqliteStore::open_in_memory().unwrap();
    let defaults = Config::load(&store).unwrap();
    assert_eq!(defaults.page_size, 50);
    assert_eq!(defaults.search_debounce_ms, 300);
    assert_eq!(defaults.month_floor, ym(2020, 1));

    Config::set(&store, "page_size", "25").unwrap();
    Config::set(&store, "currency", "eur").unwrap();
    let cfg = Config::load(&store).unwrap();
    assert_eq!(cfg.page_size, 25);
    assert_eq!(cfg.get("currency").unwrap(), "EUR");

    assert!(matches!(
        Config::set(&store, "page_size", "0"),
        Err(Error::ZeroPageSize)
    ));
    assert!(Config::set(&store, "month_floor", "2020-13").is_err());
    assert!(Config::set(&store, "currency", "EURO").is_err());
    assert!(matches!(
        Config::set(&store, "theme", "dark"),
        Err(Error::UnknownSetting(_))
    ));
    assert_eq!(Config::load(&store).unwrap().page_size, 25);
}

#[test]
fn file_store_keeps_recurring_links_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    let (expense_id, income_id) = {
        let store = SqliteStore::open(&path).unwrap();
        let e = store
            .add_expense(
                Expense::new(dec("9.99"), BuiltinCategory::Entertainment, on(2025, 4, 1))
                    .with_recurring(7),
            )
            .unwrap();
        let i = store
            .add_income(
                Income::new(dec("2500"), IncomeSource::Salary, on(2025, 4, 25)).with_recurring(8),
            )
            .unwrap();
        (e, i)
    };

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.find_expense(expense_id).unwrap().unwrap().recurring_id, Some(7));
    let incomes = store.income_summary(ym(2025, 4)).unwrap();
    assert_eq!(incomes.records[0].id, income_id);
    assert_eq!(incomes.records[0].recurring_id, Some(8));
}

#[test]
fn removing_a_category_reports_its_expenses_as_updated() {
    let store = SqliteStore::open_in_memory().unwrap();
    let coffee = store.add_category("Coffee", None, None).unwrap();
    let tagged = store
        .add_expense(Expense::new(dec("4"), ExpenseCategory::Custom(coffee), on(2025, 7, 1)))
        .unwrap();
    store
        .add_expense(Expense::new(dec("6"), BuiltinCategory::Food, on(2025, 7, 2)))
        .unwrap();

    let seen: Rc<RefCell<Vec<StoreEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _sub = store.subscribe_expenses(Box::new(move |e: &StoreEvent| sink.borrow_mut().push(*e)));
    store.remove_category(coffee).unwrap();

    let changes: Vec<(Change, i64)> = seen.borrow().iter().map(|e| (e.change, e.id)).collect();
    assert_eq!(changes, vec![(Change::Updated, tagged)]);
}

#[test]
fn notifier_debug_shows_listener_count() {
    let notifier: Notifier<StoreEvent> = Notifier::new();
    let _a = notifier.subscribe(|_| {});
    let b = notifier.subscribe(|_| {});
    assert_eq!(format!("{:?}", notifier), "Notifier { listeners: 2 }");
    b.cancel();
    assert_eq!(notifier.listener_count(), 1);
}

#[test]
fn colors_must_be_six_hex_digits() {
    assert_eq!(parse_color(Some(" #a1b2c3 ")).unwrap().as_deref(), Some("#A1B2C3"));
    assert_eq!(parse_color(Some("  ")).unwrap(), None);
    assert_eq!(parse_color(None).unwrap(), None);
    for bad in ["a1b2c3", "#12345", "#1234567", "#GGGGGG"] {
        assert!(matches!(parse_color(Some(bad)), Err(Error::InvalidColor(_))));
    }
}
