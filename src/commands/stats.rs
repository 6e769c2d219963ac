// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::SqliteStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
pub struct Stats {
    pub expenses: i64,
    pub incomes: i64,
    pub categories: i64,
    pub tags: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub db_path: Option<String>,
}

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    let mut stats = collect(store)?;
    stats.db_path = crate::db::db_path()
        .ok()
        .map(|p| p.display().to_string());
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &stats)? {
        return Ok(());
    }
    let span = match (&stats.first_date, &stats.last_date) {
        (Some(a), Some(b)) => format!("{} .. {}", a, b),
        _ => "-".to_string(),
    };
    let rows = vec![
        vec!["Expenses".to_string(), stats.expenses.to_string()],
        vec!["Incomes".to_string(), stats.incomes.to_string()],
        vec!["Custom categories".to_string(), stats.categories.to_string()],
        vec!["Tags".to_string(), stats.tags.to_string()],
        vec!["Date span".to_string(), span],
        vec![
            "Database".to_string(),
            stats.db_path.clone().unwrap_or_default(),
        ],
    ];
    println!("{}", pretty_table(&["Stat", "Value"], rows));
    Ok(())
}

pub fn collect(store: &SqliteStore) -> Result<Stats> {
    let conn = store.connection();
    let count = |table: &str| -> rusqlite::Result<i64> {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
    };
    let (first_date, last_date): (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(substr(date, 1, 10)), MAX(substr(date, 1, 10)) FROM
           (SELECT date FROM expenses UNION ALL SELECT date FROM incomes)",
        [],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )?;
    Ok(Stats {
        expenses: count("expenses")?,
        incomes: count("incomes")?,
        categories: count("custom_categories")?,
        tags: count("tags")?,
        first_date,
        last_date,
        db_path: None,
    })
}
