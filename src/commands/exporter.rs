// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use crate::commands::transactions::TransactionRow;
use crate::month::YearMonth;
use crate::store::{CatalogStore, ExpenseStore, IncomeStore, SqliteStore};
use crate::unified::unified_transactions;
use crate::utils::parse_month;
use anyhow::{Context, Result, bail};
use tracing::info;

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let from = parse_month(sub.get_one::<String>("month").context("month missing")?)?;
            let until = match sub.get_one::<String>("until") {
                Some(s) => parse_month(s)?,
                None => from,
            };
            let fmt = sub
                .get_one::<String>("format")
                .map(|s| s.to_lowercase())
                .unwrap_or_else(|| "csv".to_string());
            let out = sub.get_one::<String>("out").context("out missing")?;
            let n = export_transactions(store, from, until, &fmt, Path::new(out))?;
            println!("Exported {} transactions to {}", n, out);
        }
        _ => {}
    }
    Ok(())
}

/// Writes every unified transaction from `from` through `until`, newest month first.
pub fn export_transactions(
    store: &SqliteStore,
    from: YearMonth,
    until: YearMonth,
    fmt: &str,
    out: &Path,
) -> Result<usize> {
    if until < from {
        bail!("--until {} is before --month {}", until, from);
    }
    let catalog = store.catalog()?;
    let months: Vec<YearMonth> = from.through(until).collect();
    let mut rows = Vec::new();
    for month in months.into_iter().rev() {
        let expenses = store.expense_summary(month)?;
        let incomes = store.income_summary(month)?;
        rows.extend(
            unified_transactions(&expenses.records, &incomes.records, &catalog)
                .iter()
                .map(|t| TransactionRow::from_unified(t, &catalog)),
        );
    }

    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "kind", "date", "title", "details", "amount", "tags"])?;
            for r in &rows {
                wtr.write_record([
                    r.id.to_string(),
                    r.kind.to_string(),
                    r.date.clone(),
                    r.title.clone(),
                    r.subtitle.clone(),
                    r.amount.clone(),
                    r.tags.join(";"),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    info!(count = rows.len(), path = %out.display(), "exported transactions");
    Ok(rows.len())
}
