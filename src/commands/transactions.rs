// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::config::Config;
use crate::filter::{AmountRange, DateRange, ExpenseFilter, TypeFilter};
use crate::lookup::Catalog;
use crate::store::{CatalogStore, SqliteStore};
use crate::unified::{Source, UnifiedTransaction};
use crate::utils::{
    maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table, resolve_category,
    resolve_tags,
};
use crate::view::{DisplayState, TransactionsView, ViewConfig};
use anyhow::Result;
use serde::Serialize;

pub type SqliteView = TransactionsView<SqliteStore, SqliteStore>;

pub fn handle(store: &Rc<SqliteStore>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(store: &Rc<SqliteStore>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let listing = query_rows(store, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &listing)? {
        return Ok(());
    }
    match listing.state {
        DisplayState::EmptyStore => println!("No transactions in {}", listing.month),
        DisplayState::NoMatches => println!("No transactions in {} match", listing.month),
        DisplayState::Items => {
            let rows: Vec<Vec<String>> = listing
                .rows
                .iter()
                .map(|r| {
                    vec![
                        r.date.clone(),
                        r.kind.to_string(),
                        r.title.clone(),
                        r.subtitle.clone(),
                        r.amount.clone(),
                        r.tags.join(", "),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    &["Date", "Type", "Title", "Details", "Amount", "Tags"],
                    rows
                )
            );
            if listing.has_more {
                println!(
                    "Showing {} of {}; pass --pages {} to see more",
                    listing.rows.len(),
                    listing.total,
                    listing.pages + 1
                );
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub kind: &'static str,
    pub date: String,
    pub title: String,
    pub subtitle: String,
    pub amount: String,
    pub tags: Vec<String>,
}

impl TransactionRow {
    pub fn from_unified(tx: &UnifiedTransaction, catalog: &Catalog) -> Self {
        let tags = match &tx.source {
            Source::Expense(e) => catalog.tag_names(e.tags.iter().copied()),
            Source::Income(_) => Vec::new(),
        };
        Self {
            id: tx.id,
            kind: tx.kind().as_str(),
            date: tx.date.format("%Y-%m-%d %H:%M").to_string(),
            title: tx.title.clone(),
            subtitle: tx.subtitle.clone(),
            amount: format!("{:.2}", tx.signed_amount),
            tags,
        }
    }
}

#[derive(Serialize)]
pub struct Listing {
    pub month: String,
    pub state: DisplayState,
    pub total: usize,
    pub has_more: bool,
    pub pages: usize,
    pub rows: Vec<TransactionRow>,
}

/// Builds an attached view for the month and applies every list option.
pub fn build_view(store: &Rc<SqliteStore>, sub: &clap::ArgMatches) -> Result<SqliteView> {
    let config = Config::load(store)?;
    let mut view = TransactionsView::new(
        Rc::clone(store),
        Rc::clone(store),
        ViewConfig::from(&config),
    )?;
    view.attach()?;
    if let Some(month) = sub.get_one::<String>("month") {
        view.set_month(parse_month(month)?)?;
    }
    if let Some(t) = sub.get_one::<String>("type") {
        view.set_type_filter(t.parse::<TypeFilter>()?);
    }
    if let Some(q) = sub.get_one::<String>("search") {
        view.set_search(q);
    }
    view.set_filter(expense_filter(&store.catalog()?, &view, sub)?);

    let pages = sub.get_one::<usize>("pages").copied().unwrap_or(1).max(1);
    for _ in 1..pages {
        if !view.load_more() {
            break;
        }
    }
    Ok(view)
}

fn expense_filter(
    catalog: &Catalog,
    view: &SqliteView,
    sub: &clap::ArgMatches,
) -> Result<ExpenseFilter> {
    let mut filter = ExpenseFilter::default();
    if let Some(cats) = sub.get_many::<String>("category") {
        filter.categories = cats
            .map(|c| resolve_category(catalog, c))
            .collect::<Result<BTreeSet<_>>>()?;
    }
    if let Some(tags) = sub.get_many::<String>("tag") {
        filter.tags = resolve_tags(catalog, tags)?;
    }
    let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    if from.is_some() || to.is_some() {
        let month = view.month();
        filter.dates = Some(DateRange::new(
            from.unwrap_or_else(|| month.first_day()),
            to.unwrap_or_else(|| month.last_day()),
        )?);
    }
    let min = sub.get_one::<String>("min").map(|s| parse_decimal(s)).transpose()?;
    let max = sub.get_one::<String>("max").map(|s| parse_decimal(s)).transpose()?;
    if min.is_some() || max.is_some() {
        filter.amounts = Some(AmountRange::new(min, max)?);
    }
    filter.query = sub.get_one::<String>("query").cloned();
    Ok(filter)
}

pub fn query_rows(store: &Rc<SqliteStore>, sub: &clap::ArgMatches) -> Result<Listing> {
    let view = build_view(store, sub)?;
    let catalog = store.catalog()?;
    let rows = view
        .visible()
        .into_iter()
        .map(|t| TransactionRow::from_unified(t, &catalog))
        .collect();
    Ok(Listing {
        month: view.month().to_string(),
        state: view.display_state(),
        total: view.matching().len(),
        has_more: view.has_more(),
        pages: view.page() + 1,
        rows,
    })
}
