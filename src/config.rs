// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User settings persisted in the `settings` table.

use std::time::Duration;

use serde::Serialize;

use crate::debounce::SEARCH_DEBOUNCE;
use crate::error::{Error, Result};
use crate::month::YearMonth;
use crate::pagination::PAGE_SIZE;
use crate::store::SqliteStore;

pub const KEYS: [&str; 4] = ["page_size", "search_debounce_ms", "month_floor", "currency"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub page_size: usize,
    pub search_debounce_ms: u64,
    pub month_floor: YearMonth,
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            search_debounce_ms: SEARCH_DEBOUNCE.as_millis() as u64,
            month_floor: default_floor(),
            currency: "USD".to_string(),
        }
    }
}

fn default_floor() -> YearMonth {
    YearMonth::new(2020, 1).unwrap_or_else(|_| YearMonth::current())
}

impl Config {
    pub fn load(store: &SqliteStore) -> Result<Self> {
        let mut config = Config::default();
        for key in KEYS {
            if let Some(value) = store.setting(key)? {
                config.apply(key, &value)?;
            }
        }
        Ok(config)
    }

    /// Validates and stores one setting.
    pub fn set(store: &SqliteStore, key: &str, value: &str) -> Result<Config> {
        let mut config = Config::load(store)?;
        config.apply(key, value)?;
        store.set_setting(key, value.trim())?;
        Ok(config)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        Ok(match key {
            "page_size" => self.page_size.to_string(),
            "search_debounce_ms" => self.search_debounce_ms.to_string(),
            "month_floor" => self.month_floor.to_string(),
            "currency" => self.currency.clone(),
            other => return Err(Error::UnknownSetting(other.to_string())),
        })
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let invalid = || Error::InvalidSetting {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "page_size" => {
                let n: usize = value.parse().map_err(|_| invalid())?;
                if n == 0 {
                    return Err(Error::ZeroPageSize);
                }
                self.page_size = n;
            }
            "search_debounce_ms" => {
                self.search_debounce_ms = value.parse().map_err(|_| invalid())?;
            }
            "month_floor" => {
                self.month_floor = value.parse().map_err(|_| invalid())?;
            }
            "currency" => {
                if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(invalid());
                }
                self.currency = value.to_uppercase();
            }
            other => return Err(Error::UnknownSetting(other.to_string())),
        }
        Ok(())
    }
}
