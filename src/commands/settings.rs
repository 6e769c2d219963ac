// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Config, KEYS};
use crate::store::SqliteStore;
use crate::utils::pretty_table;
use anyhow::{Context, Result};

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let config = Config::load(store)?;
            match sub.get_one::<String>("key") {
                Some(key) => println!("{}", config.get(key.trim())?),
                None => {
                    let mut rows = Vec::new();
                    for key in KEYS {
                        rows.push(vec![key.to_string(), config.get(key)?]);
                    }
                    println!("{}", pretty_table(&["Key", "Value"], rows));
                }
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").context("key missing")?.trim();
            let value = sub.get_one::<String>("value").context("value missing")?;
            let config = Config::set(store, key, value)?;
            println!("{} = {}", key, config.get(key)?);
        }
        _ => {}
    }
    Ok(())
}
