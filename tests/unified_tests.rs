// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use pocketledger::filter::{
    AmountRange, DateRange, ExpenseFilter, SearchQuery, TypeFilter, apply_filters,
    apply_type_filter,
};
use pocketledger::lookup::{Catalog, FALLBACK_CATEGORY};
use pocketledger::models::{
    BuiltinCategory, CustomCategory, Expense, ExpenseCategory, Income, IncomeSource, RecordKind,
    Tag,
};
use pocketledger::unified::unified_transactions;
use rust_decimal::Decimal;

fn at(d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn expense(id: i64, amount: &str, cat: BuiltinCategory, when: NaiveDateTime) -> Expense {
    let mut e = Expense::new(dec(amount), cat, when);
    e.id = id;
    e
}

fn income(id: i64, amount: &str, when: NaiveDateTime) -> Income {
    let mut i = Income::new(dec(amount), IncomeSource::Salary, when);
    i.id = id;
    i
}

fn catalog() -> Catalog {
    Catalog::new(
        [CustomCategory {
            id: 100,
            name: "Pets".into(),
            icon: None,
            color: Some("#112233".into()),
        }],
        [
            Tag {
                id: 200,
                name: "work".into(),
                color: None,
            },
            Tag {
                id: 201,
                name: "trip".into(),
                color: None,
            },
        ],
    )
}

#[test]
fn merge_is_newest_first_with_signed_amounts() {
    let expenses = vec![
        expense(1, "10", BuiltinCategory::Food, at(1, 9)),
        expense(2, "20", BuiltinCategory::Food, at(5, 9)),
        expense(3, "30", BuiltinCategory::Food, at(9, 9)),
    ];
    let incomes = vec![income(4, "100", at(3, 9)), income(5, "50", at(7, 9))];
    let items = unified_transactions(&expenses, &incomes, &catalog());

    assert_eq!(items.len(), 5);
    let ids: Vec<i64> = items.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 5, 2, 4, 1]);
    assert!(items.windows(2).all(|w| w[0].date >= w[1].date));

    let spent: Decimal = items
        .iter()
        .filter(|t| t.kind() == RecordKind::Expense)
        .map(|t| t.amount())
        .sum();
    let received: Decimal = items
        .iter()
        .filter(|t| t.kind() == RecordKind::Income)
        .map(|t| t.signed_amount)
        .sum();
    assert_eq!(spent, dec("60"));
    assert_eq!(received, dec("150"));
    assert_eq!(items[0].signed_amount, dec("-30"));
}

#[test]
fn equal_timestamps_put_expenses_first() {
    let when = at(10, 12);
    let expenses = vec![
        expense(1, "5", BuiltinCategory::Bills, when),
        expense(7, "5", BuiltinCategory::Bills, when),
    ];
    let incomes = vec![income(9, "5", when)];
    let items = unified_transactions(&expenses, &incomes, &catalog());
    let keys: Vec<(RecordKind, i64)> = items.iter().map(|t| (t.kind(), t.id)).collect();
    assert_eq!(
        keys,
        vec![
            (RecordKind::Expense, 7),
            (RecordKind::Expense, 1),
            (RecordKind::Income, 9)
        ]
    );
}

#[test]
fn titles_fall_back_to_category_and_source_names() {
    let e1 = expense(1, "4.50", BuiltinCategory::Food, at(2, 8))
        .with_merchant("STARBUCKS")
        .with_note("latte");
    let e2 = expense(2, "12", BuiltinCategory::Transport, at(2, 9));
    let i1 = income(3, "900", at(1, 8));
    let i2 = income(4, "20", at(1, 7)).with_note("Sold a chair");
    let items = unified_transactions(&[e1, e2], &[i1, i2], &catalog());

    assert_eq!(items[0].title, "Transport");
    assert_eq!(items[1].title, "STARBUCKS");
    assert_eq!(items[1].subtitle, "Food & Dining · latte");
    assert_eq!(items[2].title, "Salary");
    assert_eq!(items[2].subtitle, "Income");
    assert_eq!(items[3].subtitle, "Sold a chair");
}

#[test]
fn removed_custom_category_renders_as_uncategorized() {
    let live = Expense::new(dec("8"), ExpenseCategory::Custom(100), at(4, 10));
    let gone = Expense::new(dec("9"), ExpenseCategory::Custom(999), at(4, 11));
    let items = unified_transactions(&[live, gone], &[], &catalog());
    assert_eq!(items[0].display.name, FALLBACK_CATEGORY);
    assert_eq!(items[1].display.name, "Pets");
    assert_eq!(items[1].display.color, "#112233");
}

#[test]
fn type_filter_partitions_the_list() {
    let expenses = vec![
        expense(1, "10", BuiltinCategory::Food, at(1, 9)),
        expense(2, "20", BuiltinCategory::Health, at(2, 9)),
    ];
    let incomes = vec![income(3, "100", at(3, 9))];
    let items = unified_transactions(&expenses, &incomes, &catalog());

    let all = apply_type_filter(&items, TypeFilter::All);
    let inc = apply_type_filter(&items, TypeFilter::Income);
    let exp = apply_type_filter(&items, TypeFilter::Expense);
    assert_eq!(all.len(), items.len());
    assert_eq!(inc.len() + exp.len(), items.len());
    assert!(inc.iter().all(|t| t.kind() == RecordKind::Income));
    assert!(exp.iter().all(|t| t.kind() == RecordKind::Expense));
    assert_eq!("Expenses".parse::<TypeFilter>().unwrap(), TypeFilter::Expense);
    assert!("transfers".parse::<TypeFilter>().is_err());
}

#[test]
fn search_ignores_case_and_empty_result_is_empty() {
    let expenses = vec![
        expense(1, "4.50", BuiltinCategory::Food, at(2, 8)).with_merchant("STARBUCKS"),
        expense(2, "30", BuiltinCategory::Shopping, at(3, 8)).with_merchant("Hardware Co"),
    ];
    let items = unified_transactions(&expenses, &[], &catalog());
    let none = ExpenseFilter::default();

    let hit = apply_filters(&items, TypeFilter::All, &SearchQuery::new("  star "), &none);
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].title, "STARBUCKS");

    let miss = apply_filters(&items, TypeFilter::All, &SearchQuery::new("xyz"), &none);
    assert!(miss.is_empty());

    let blank = apply_filters(&items, TypeFilter::All, &SearchQuery::new("   "), &none);
    assert_eq!(blank.len(), 2);
}

#[test]
fn expense_filter_never_drops_incomes() {
    let expenses = vec![
        expense(1, "10", BuiltinCategory::Food, at(1, 9)).with_tags([200]),
        expense(2, "80", BuiltinCategory::Travel, at(12, 9)).with_tags([201]),
        expense(3, "25", BuiltinCategory::Food, at(20, 9)),
    ];
    let incomes = vec![income(4, "500", at(15, 9))];
    let items = unified_transactions(&expenses, &incomes, &catalog());

    let filter = ExpenseFilter {
        categories: [ExpenseCategory::Builtin(BuiltinCategory::Food)].into(),
        ..Default::default()
    };
    let ids: Vec<i64> = apply_filters(&items, TypeFilter::All, &SearchQuery::default(), &filter)
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![3, 4, 1]);

    let filter = ExpenseFilter {
        tags: [200, 201].into(),
        amounts: Some(AmountRange::new(Some(dec("50")), None).unwrap()),
        ..Default::default()
    };
    let ids: Vec<i64> = apply_filters(&items, TypeFilter::All, &SearchQuery::default(), &filter)
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![4, 2]);

    let filter = ExpenseFilter {
        dates: Some(
            DateRange::new(
                NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            )
            .unwrap(),
        ),
        ..Default::default()
    };
    let ids: Vec<i64> = apply_filters(&items, TypeFilter::Expense, &SearchQuery::default(), &filter)
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![3, 2]);
}

#[test]
fn filtering_twice_changes_nothing() {
    let expenses = vec![
        expense(1, "10", BuiltinCategory::Food, at(1, 9)).with_merchant("Cafe"),
        expense(2, "20", BuiltinCategory::Food, at(2, 9)).with_merchant("Bakery"),
    ];
    let incomes = vec![income(3, "40", at(3, 9)).with_note("cafe tips")];
    let items = unified_transactions(&expenses, &incomes, &catalog());
    let search = SearchQuery::new("cafe");
    let filter = ExpenseFilter {
        query: Some("caf".into()),
        ..Default::default()
    };

    let once: Vec<_> = apply_filters(&items, TypeFilter::All, &search, &filter)
        .into_iter()
        .cloned()
        .collect();
    let twice = apply_filters(&once, TypeFilter::All, &search, &filter);
    assert_eq!(once.len(), twice.len());
    assert_eq!(once.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3, 1]);
}

#[test]
fn inverted_ranges_are_rejected() {
    let start = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    assert!(DateRange::new(start, end).is_err());
    assert!(AmountRange::new(Some(dec("10")), Some(dec("5"))).is_err());
    assert!(AmountRange::new(Some(dec("5")), Some(dec("5"))).is_ok());
}
