// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Type filter, free-text search and structured expense filters over unified rows.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Expense, ExpenseCategory, RecordId, RecordKind};
use crate::unified::UnifiedTransaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn admits(&self, kind: RecordKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => kind == RecordKind::Income,
            TypeFilter::Expense => kind == RecordKind::Expense,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" | "incomes" => Ok(TypeFilter::Income),
            "expense" | "expenses" => Ok(TypeFilter::Expense),
            _ => Err(Error::UnknownName {
                what: "transaction type",
                value: s.to_string(),
            }),
        }
    }
}

pub fn apply_type_filter(
    items: &[UnifiedTransaction],
    filter: TypeFilter,
) -> Vec<&UnifiedTransaction> {
    items.iter().filter(|t| filter.admits(t.kind())).collect()
}

/// Case-insensitive needle; blank input matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn is_active(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, tx: &UnifiedTransaction) -> bool {
        !self.is_active()
            || tx.title.to_lowercase().contains(&self.0)
            || tx.subtitle.to_lowercase().contains(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Inclusive bounds, either side optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmountRange {
    min: Option<Decimal>,
    max: Option<Decimal>,
}

impl AmountRange {
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Result<Self> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(Error::InvalidAmountRange { min, max });
            }
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, amount: Decimal) -> bool {
        self.min.is_none_or(|m| amount >= m) && self.max.is_none_or(|m| amount <= m)
    }

    fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Conjunction of optional predicates over expenses. Incomes are never excluded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub categories: BTreeSet<ExpenseCategory>,
    pub tags: BTreeSet<RecordId>,
    pub dates: Option<DateRange>,
    pub amounts: Option<AmountRange>,
    pub query: Option<String>,
}

impl ExpenseFilter {
    pub fn is_active(&self) -> bool {
        !self.categories.is_empty()
            || !self.tags.is_empty()
            || self.dates.is_some()
            || self.amounts.is_some_and(|a| !a.is_unbounded())
            || self.query.as_deref().is_some_and(|q| !q.trim().is_empty())
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&expense.category) {
            return false;
        }
        if !self.tags.is_empty() && self.tags.is_disjoint(&expense.tags) {
            return false;
        }
        if let Some(range) = &self.dates {
            if !range.contains(expense.date.date()) {
                return false;
            }
        }
        if let Some(range) = &self.amounts {
            if !range.contains(expense.amount) {
                return false;
            }
        }
        if let Some(q) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            let hit = |s: &Option<String>| {
                s.as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&q))
            };
            if !hit(&expense.merchant) && !hit(&expense.note) {
                return false;
            }
        }
        true
    }

    pub fn admits(&self, tx: &UnifiedTransaction) -> bool {
        match tx.as_expense() {
            Some(expense) => self.matches(expense),
            None => true,
        }
    }
}

/// Type filter first, then search and structured filter as one conjunction.
pub fn apply_filters<'a>(
    items: &'a [UnifiedTransaction],
    type_filter: TypeFilter,
    search: &SearchQuery,
    filter: &ExpenseFilter,
) -> Vec<&'a UnifiedTransaction> {
    items
        .iter()
        .filter(|t| type_filter.admits(t.kind()))
        .filter(|t| search.matches(t) && filter.admits(t))
        .collect()
}
