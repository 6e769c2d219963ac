// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Expense;
use crate::store::{CatalogStore, ExpenseStore, SqliteStore};
use crate::utils::{parse_datetime, parse_decimal, resolve_category, resolve_tags};
use anyhow::{Context, Result};

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let catalog = store.catalog()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").context("amount missing")?)?;
    let date = parse_datetime(sub.get_one::<String>("date").context("date missing")?)?;
    let category = resolve_category(
        &catalog,
        sub.get_one::<String>("category")
            .map(String::as_str)
            .unwrap_or("other"),
    )?;

    let mut expense = Expense::new(amount, category, date);
    expense.merchant = sub
        .get_one::<String>("merchant")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    expense.note = sub
        .get_one::<String>("note")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    expense.recurring_id = sub.get_one::<i64>("recurring").copied();
    if let Some(tags) = sub.get_many::<String>("tag") {
        expense.tags = resolve_tags(&catalog, tags)?;
    }

    let id = store.add_expense(expense)?;
    println!("Recorded expense #{} of {} on {}", id, amount, date.date());
    Ok(())
}

fn edit(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id missing")?;
    let mut expense = store
        .find_expense(id)?
        .with_context(|| format!("Expense #{} not found", id))?;
    let catalog = store.catalog()?;

    if let Some(a) = sub.get_one::<String>("amount") {
        expense.amount = parse_decimal(a)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        expense.category = resolve_category(&catalog, c)?;
    }
    if let Some(d) = sub.get_one::<String>("date") {
        expense.date = parse_datetime(d)?;
    }
    if let Some(mch) = sub.get_one::<String>("merchant") {
        expense.merchant = Some(mch.trim().to_string()).filter(|s| !s.is_empty());
    }
    if let Some(n) = sub.get_one::<String>("note") {
        expense.note = Some(n.trim().to_string()).filter(|s| !s.is_empty());
    }
    if let Some(tags) = sub.get_many::<String>("tag") {
        expense.tags = resolve_tags(&catalog, tags)?;
    }

    store.update_expense(&expense)?;
    println!("Updated expense #{}", id);
    Ok(())
}

fn rm(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id missing")?;
    store
        .delete_expense(id)
        .with_context(|| format!("Could not remove expense #{}", id))?;
    println!("Removed expense #{}", id);
    Ok(())
}
