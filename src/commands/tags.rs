// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{CatalogStore, SqliteStore};
use crate::utils::pretty_table;
use anyhow::{Context, Result};
use rusqlite::params;

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").context("name missing")?;
            let color = sub.get_one::<String>("color").map(String::as_str);
            store
                .add_tag(name, color)
                .with_context(|| format!("Could not add tag '{}'", name.trim()))?;
            println!("Added tag '{}'", name.trim());
        }
        Some(("list", _)) => {
            let catalog = store.catalog()?;
            let mut data = Vec::new();
            for t in catalog.tags() {
                let used: i64 = store.connection().query_row(
                    "SELECT COUNT(*) FROM expense_tags WHERE tag_id=?1",
                    params![t.id],
                    |r| r.get(0),
                )?;
                data.push(vec![
                    t.name.clone(),
                    t.color.clone().unwrap_or_default(),
                    used.to_string(),
                ]);
            }
            println!("{}", pretty_table(&["Tag", "Color", "Expenses"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").context("name missing")?;
            let catalog = store.catalog()?;
            let tag = catalog
                .tag_by_name(name)
                .with_context(|| format!("Tag '{}' not found", name.trim()))?;
            store.remove_tag(tag.id)?;
            println!("Removed tag '{}'", tag.name);
        }
        _ => {}
    }
    Ok(())
}
