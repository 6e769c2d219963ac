// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use pocketledger::models::{BuiltinCategory, Expense, ExpenseCategory, Income, IncomeSource};
use pocketledger::month::{MonthBounds, YearMonth};
use pocketledger::pagination::{Pagination, has_more, visible_count, visible_page};
use pocketledger::summary::{MonthOverview, MonthSummary, Pace};
use rust_decimal::Decimal;

fn ym(y: i32, m: u32) -> YearMonth {
    YearMonth::new(y, m).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    day(y, m, d).and_hms_opt(12, 0, 0).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn expense(id: i64, amount: &str, cat: BuiltinCategory, when: NaiveDateTime) -> Expense {
    let mut e = Expense::new(dec(amount), cat, when);
    e.id = id;
    e
}

#[test]
fn summary_totals_match_breakdown_and_skip_other_months() {
    let month = ym(2024, 3);
    let records = vec![
        expense(1, "10", BuiltinCategory::Food, at(2024, 3, 1)),
        expense(2, "20", BuiltinCategory::Food, at(2024, 3, 15)),
        expense(3, "30", BuiltinCategory::Food, at(2024, 3, 31)),
        expense(4, "5.25", BuiltinCategory::Transport, at(2024, 3, 2)),
        expense(5, "99", BuiltinCategory::Food, at(2024, 4, 1)),
        expense(6, "99", BuiltinCategory::Food, at(2024, 2, 29)),
    ];
    let s = MonthSummary::build(month, records);

    assert_eq!(s.count, 4);
    assert_eq!(s.total, dec("65.25"));
    assert_eq!(s.breakdown.values().copied().sum::<Decimal>(), s.total);
    assert_eq!(
        s.breakdown[&ExpenseCategory::Builtin(BuiltinCategory::Food)],
        dec("60")
    );
    let ids: Vec<i64> = s.records.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 2, 4, 1]);

    let ranked = s.ranked();
    assert_eq!(ranked[0].0, ExpenseCategory::Builtin(BuiltinCategory::Food));
}

#[test]
fn empty_month_has_no_shares() {
    let s: MonthSummary<Expense> = MonthSummary::build(ym(2024, 3), Vec::new());
    assert!(s.is_empty());
    assert_eq!(s.total, Decimal::ZERO);
    assert!(s.shares().is_empty());
}

#[test]
fn shares_always_add_to_one_hundred() {
    let month = ym(2024, 5);
    let records = vec![
        expense(1, "1", BuiltinCategory::Food, at(2024, 5, 1)),
        expense(2, "1", BuiltinCategory::Bills, at(2024, 5, 2)),
        expense(3, "1", BuiltinCategory::Health, at(2024, 5, 3)),
    ];
    let s = MonthSummary::build(month, records);
    let shares = s.shares();
    assert_eq!(shares.len(), 3);
    assert_eq!(shares.values().copied().sum::<Decimal>(), dec("100"));
    assert!(shares.values().all(|p| *p >= dec("33.33") && *p <= dec("33.34")));
}

#[test]
fn pace_depends_on_where_today_falls() {
    let month = ym(2024, 4);
    let total = dec("300");

    let mid = Pace::compute(month, total, day(2024, 4, 10));
    assert_eq!(mid.days_elapsed, 10);
    assert_eq!(mid.days_in_month, 30);
    assert_eq!(mid.daily_average, dec("30"));
    assert_eq!(mid.projected_total, dec("900"));

    let past = Pace::compute(month, total, day(2024, 6, 1));
    assert_eq!(past.days_elapsed, 30);
    assert_eq!(past.daily_average, dec("10"));
    assert_eq!(past.projected_total, total);

    let ahead = Pace::compute(month, total, day(2024, 3, 20));
    assert_eq!(ahead.days_elapsed, 0);
    assert_eq!(ahead.daily_average, Decimal::ZERO);
}

#[test]
fn overview_net_and_savings_rate() {
    let month = ym(2024, 3);
    let expenses = MonthSummary::build(
        month,
        vec![expense(1, "60", BuiltinCategory::Food, at(2024, 3, 4))],
    );
    let mut salary = Income::new(dec("150"), IncomeSource::Salary, at(2024, 3, 1));
    salary.id = 2;
    let incomes = MonthSummary::build(month, vec![salary]);
    let overview = MonthOverview { expenses, incomes };
    assert_eq!(overview.month(), month);
    assert_eq!(overview.net(), dec("90"));
    assert_eq!(overview.savings_rate(), Some(dec("60")));

    let none = MonthOverview {
        expenses: MonthSummary::empty(month),
        incomes: MonthSummary::empty(month),
    };
    assert_eq!(none.savings_rate(), None);
}

#[test]
fn month_arithmetic_wraps_years() {
    assert_eq!(ym(2024, 1).prev(), ym(2023, 12));
    assert_eq!(ym(2023, 12).next(), ym(2024, 1));
    assert_eq!(ym(2024, 2).days_in_month(), 29);
    assert_eq!(ym(2024, 2).last_day(), day(2024, 2, 29));
    assert_eq!("2024-07".parse::<YearMonth>().unwrap(), ym(2024, 7));
    assert_eq!(ym(2024, 7).to_string(), "2024-07");
    assert!("2024-13".parse::<YearMonth>().is_err());
    assert!("July".parse::<YearMonth>().is_err());
    let span: Vec<_> = ym(2023, 11).through(ym(2024, 2)).collect();
    assert_eq!(span.len(), 4);
}

#[test]
fn month_bounds_block_the_future_and_floor_jumps() {
    let bounds = MonthBounds::new(ym(2020, 1), ym(2024, 3));
    assert_eq!(bounds.next(ym(2024, 2)), Some(ym(2024, 3)));
    assert_eq!(bounds.next(ym(2024, 3)), None);
    assert_eq!(bounds.prev(ym(2020, 1)), ym(2019, 12));
    assert!(bounds.jump(ym(2024, 4)).is_err());
    assert!(bounds.jump(ym(2019, 12)).is_err());
    assert_eq!(bounds.jump(ym(2020, 1)).unwrap(), ym(2020, 1));
}

#[test]
fn paging_a_month_of_120_rows() {
    let rows: Vec<u32> = (0..120).collect();
    assert_eq!(visible_page(&rows, 0, 50).len(), 50);
    assert!(has_more(120, 0, 50));
    assert_eq!(visible_page(&rows, 1, 50).len(), 100);
    assert!(has_more(120, 1, 50));
    assert_eq!(visible_page(&rows, 2, 50).len(), 120);
    assert!(!has_more(120, 2, 50));
    assert_eq!(visible_count(0, 0, 50), 0);

    let mut p = Pagination::default();
    let mut seen = Vec::new();
    loop {
        seen.push(p.slice(&rows).len());
        if !p.load_more(rows.len()) {
            break;
        }
    }
    assert_eq!(seen, vec![50, 100, 120]);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    p.reset();
    assert_eq!(p.page(), 0);
    assert!(Pagination::new(0).is_err());
}
