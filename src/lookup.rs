// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Display lookups for categories, sources and tags.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{CustomCategory, ExpenseCategory, IncomeSource, RecordId, Tag};

static COLOR_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").ok());

pub const DEFAULT_COLOR: &str = "#9E9E9E";
pub const FALLBACK_CATEGORY: &str = "Uncategorized";

/// Normalizes an optional `#RRGGBB` color, rejecting anything else.
pub fn parse_color(raw: Option<&str>) -> Result<Option<String>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(c) if COLOR_RE.as_ref().is_some_and(|re| re.is_match(c)) => Ok(Some(c.to_uppercase())),
        Some(c) => Err(Error::InvalidColor(c.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Display {
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl Display {
    fn fallback() -> Self {
        Self {
            name: FALLBACK_CATEGORY.to_string(),
            icon: "?".to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Snapshot of the user-defined categories and tags.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: BTreeMap<RecordId, CustomCategory>,
    tags: BTreeMap<RecordId, Tag>,
}

impl Catalog {
    pub fn new(
        categories: impl IntoIterator<Item = CustomCategory>,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Self {
        Self {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            tags: tags.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    /// `None` when a custom category has been deleted out from under its expenses.
    pub fn custom_category(&self, id: RecordId) -> Option<&CustomCategory> {
        self.categories.get(&id)
    }

    pub fn tag(&self, id: RecordId) -> Option<&Tag> {
        self.tags.get(&id)
    }

    pub fn categories(&self) -> impl Iterator<Item = &CustomCategory> {
        self.categories.values()
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    pub fn category_by_name(&self, name: &str) -> Option<&CustomCategory> {
        let name = name.trim();
        self.categories
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        let name = name.trim();
        self.tags.values().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn category_display(&self, category: &ExpenseCategory) -> Display {
        match category {
            ExpenseCategory::Builtin(b) => Display {
                name: b.display_name().to_string(),
                icon: builtin_icon(b.as_str()).to_string(),
                color: builtin_color(b.as_str()).to_string(),
            },
            ExpenseCategory::Custom(id) => match self.custom_category(*id) {
                Some(c) => Display {
                    name: c.name.clone(),
                    icon: c.icon.clone().unwrap_or_else(|| "•".to_string()),
                    color: c.color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_string()),
                },
                None => Display::fallback(),
            },
        }
    }

    pub fn source_display(&self, source: &IncomeSource) -> Display {
        Display {
            name: source.display_name().to_string(),
            icon: builtin_icon(source.as_str()).to_string(),
            color: "#2E7D32".to_string(),
        }
    }

    pub fn tag_names(&self, ids: impl IntoIterator<Item = RecordId>) -> Vec<String> {
        ids.into_iter()
            .filter_map(|id| self.tag(id).map(|t| t.name.clone()))
            .collect()
    }
}

fn builtin_icon(key: &str) -> &'static str {
    match key {
        "food" => "🍽",
        "groceries" => "🛒",
        "transport" => "🚌",
        "shopping" => "🛍",
        "entertainment" => "🎬",
        "bills" => "💡",
        "health" => "💊",
        "education" => "📚",
        "travel" => "✈",
        "salary" | "freelance" | "business" => "💼",
        "investment" => "📈",
        "gift" => "🎁",
        "refund" => "↩",
        _ => "•",
    }
}

fn builtin_color(key: &str) -> &'static str {
    match key {
        "food" => "#FF7043",
        "groceries" => "#66BB6A",
        "transport" => "#42A5F5",
        "shopping" => "#AB47BC",
        "entertainment" => "#EC407A",
        "bills" => "#FFA726",
        "health" => "#26A69A",
        "education" => "#5C6BC0",
        "travel" => "#29B6F6",
        _ => DEFAULT_COLOR,
    }
}
