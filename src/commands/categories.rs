// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::BuiltinCategory;
use crate::store::{CatalogStore, SqliteStore};
use crate::utils::pretty_table;
use anyhow::{Context, Result};

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").context("name missing")?;
            if name.parse::<BuiltinCategory>().is_ok() {
                anyhow::bail!("'{}' is a built-in category", name.trim());
            }
            let icon = sub.get_one::<String>("icon").map(String::as_str);
            let color = sub.get_one::<String>("color").map(String::as_str);
            store
                .add_category(name, icon, color)
                .with_context(|| format!("Could not add category '{}'", name.trim()))?;
            println!("Added category '{}'", name.trim());
        }
        Some(("list", _)) => {
            let catalog = store.catalog()?;
            let mut data: Vec<Vec<String>> = BuiltinCategory::all()
                .iter()
                .map(|b| {
                    vec![
                        b.as_str().to_string(),
                        b.display_name().to_string(),
                        "built-in".to_string(),
                    ]
                })
                .collect();
            for c in catalog.categories() {
                data.push(vec![
                    c.name.clone(),
                    format!(
                        "{} {}",
                        c.icon.as_deref().unwrap_or(""),
                        c.color.as_deref().unwrap_or("")
                    )
                    .trim()
                    .to_string(),
                    "custom".to_string(),
                ]);
            }
            println!("{}", pretty_table(&["Key", "Display", "Kind"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").context("name missing")?;
            let catalog = store.catalog()?;
            let cat = catalog
                .category_by_name(name)
                .with_context(|| format!("Category '{}' not found", name.trim()))?;
            store.remove_category(cat.id)?;
            println!("Removed category '{}'", cat.name);
        }
        _ => {}
    }
    Ok(())
}
