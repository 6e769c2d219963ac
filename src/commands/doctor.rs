// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::parse_stored_datetime;
use crate::models::{BuiltinCategory, IncomeSource};
use crate::utils::pretty_table;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let rows = check(conn, today)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// One `[issue, detail]` row per problem found.
pub fn check(conn: &Connection, today: NaiveDate) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // Expenses pointing at a removed custom category
    let mut stmt = conn.prepare(
        "SELECT e.id, e.custom_category_id FROM expenses e
         LEFT JOIN custom_categories c ON c.id=e.custom_category_id
         WHERE e.category='custom' AND c.id IS NULL ORDER BY e.id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let cat: Option<i64> = r.get(1)?;
        let cat = cat.map(|c| c.to_string()).unwrap_or_else(|| "none".into());
        rows.push(vec![
            "dangling_category".into(),
            format!("expense {} -> category {}", id, cat),
        ]);
    }

    for table in ["expenses", "incomes"] {
        let key_column = if table == "expenses" { "category" } else { "source" };
        let mut stmt = conn.prepare(&format!(
            "SELECT id, date, amount, {key_column} FROM {table} ORDER BY id"
        ))?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let date: String = r.get(1)?;
            let amount: String = r.get(2)?;
            let key: String = r.get(3)?;
            let record = format!("{} {}", &table[..table.len() - 1], id);

            match amount.trim().parse::<Decimal>() {
                Ok(a) if a <= Decimal::ZERO => {
                    rows.push(vec!["non_positive_amount".into(), format!("{record}: {amount}")]);
                }
                Ok(_) => {}
                Err(_) => rows.push(vec!["bad_amount".into(), format!("{record}: {amount}")]),
            }
            match parse_stored_datetime(date.trim()) {
                Some(d) if d.date() > today => {
                    rows.push(vec!["future_date".into(), format!("{record}: {date}")]);
                }
                Some(_) => {}
                None => rows.push(vec!["bad_date".into(), format!("{record}: {date}")]),
            }
            let known = if table == "expenses" {
                key == "custom" || key.parse::<BuiltinCategory>().is_ok()
            } else {
                key.parse::<IncomeSource>().is_ok()
            };
            if !known {
                rows.push(vec![format!("unknown_{key_column}"), format!("{record}: {key}")]);
            }
        }
    }
    Ok(rows)
}
