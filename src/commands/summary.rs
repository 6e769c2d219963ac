// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::lookup::Catalog;
use crate::month::YearMonth;
use crate::store::{CatalogStore, ExpenseStore, IncomeStore, SqliteStore};
use crate::summary::{MonthOverview, Pace};
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BreakdownLine {
    pub name: String,
    pub amount: Decimal,
    pub share: Decimal,
}

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub month: String,
    pub currency: String,
    pub expense_total: Decimal,
    pub expense_count: usize,
    pub income_total: Decimal,
    pub income_count: usize,
    pub net: Decimal,
    pub savings_rate: Option<Decimal>,
    pub pace: Pace,
    pub expenses: Vec<BreakdownLine>,
    pub incomes: Vec<BreakdownLine>,
}

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let month = match m.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => YearMonth::current(),
    };
    let today = chrono::Local::now().date_naive();
    let report = report(store, month, today)?;

    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }
    let ccy = report.currency.as_str();
    let lines = |items: &[BreakdownLine]| -> Vec<Vec<String>> {
        items
            .iter()
            .map(|l| {
                vec![
                    l.name.clone(),
                    fmt_money(&l.amount, ccy),
                    format!("{:.2}%", l.share),
                ]
            })
            .collect()
    };
    println!("{}", report.month);
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "Share"], lines(&report.expenses))
    );
    println!(
        "{}",
        pretty_table(&["Source", "Received", "Share"], lines(&report.incomes))
    );
    let rate = report
        .savings_rate
        .map(|r| format!("{}%", r))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{}",
        pretty_table(
            &["Spent", "Received", "Net", "Saved", "Daily avg", "Projected"],
            vec![vec![
                fmt_money(&report.expense_total, ccy),
                fmt_money(&report.income_total, ccy),
                fmt_money(&report.net, ccy),
                rate,
                fmt_money(&report.pace.daily_average, ccy),
                fmt_money(&report.pace.projected_total, ccy),
            ]],
        )
    );
    Ok(())
}

pub fn report(store: &SqliteStore, month: YearMonth, today: NaiveDate) -> Result<SummaryReport> {
    let config = Config::load(store)?;
    let catalog: Catalog = store.catalog()?;
    let overview = MonthOverview {
        expenses: store.expense_summary(month)?,
        incomes: store.income_summary(month)?,
    };

    let expense_shares = overview.expenses.shares();
    let expenses = overview
        .expenses
        .ranked()
        .into_iter()
        .map(|(cat, amount)| BreakdownLine {
            name: catalog.category_display(&cat).name,
            amount,
            share: expense_shares.get(&cat).copied().unwrap_or_default(),
        })
        .collect();
    let income_shares = overview.incomes.shares();
    let incomes = overview
        .incomes
        .ranked()
        .into_iter()
        .map(|(src, amount)| BreakdownLine {
            name: src.display_name().to_string(),
            amount,
            share: income_shares.get(&src).copied().unwrap_or_default(),
        })
        .collect();

    Ok(SummaryReport {
        month: month.to_string(),
        currency: config.currency,
        expense_total: overview.expenses.total,
        expense_count: overview.expenses.count,
        income_total: overview.incomes.total,
        income_count: overview.incomes.count,
        net: overview.net(),
        savings_rate: overview.savings_rate(),
        pace: overview.expenses.pace(today),
        expenses,
        incomes,
    })
}
