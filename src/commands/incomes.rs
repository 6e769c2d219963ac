// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Income, IncomeSource};
use crate::store::{IncomeStore, SqliteStore};
use crate::utils::{parse_datetime, parse_decimal};
use anyhow::{Context, Result};

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let amount =
                parse_decimal(sub.get_one::<String>("amount").context("amount missing")?)?;
            let date = parse_datetime(sub.get_one::<String>("date").context("date missing")?)?;
            let source: IncomeSource = sub
                .get_one::<String>("source")
                .map(String::as_str)
                .unwrap_or("salary")
                .parse()?;

            let mut income = Income::new(amount, source, date);
            income.note = sub
                .get_one::<String>("note")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            income.recurring_id = sub.get_one::<i64>("recurring").copied();

            let id = store.add_income(income)?;
            println!(
                "Recorded income #{} of {} ({}) on {}",
                id,
                amount,
                source.display_name(),
                date.date()
            );
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("id missing")?;
            store
                .delete_income(id)
                .with_context(|| format!("Could not remove income #{}", id))?;
            println!("Removed income #{}", id);
        }
        _ => {}
    }
    Ok(())
}
