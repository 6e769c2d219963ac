// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub type RecordId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Expense,
    Income,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Expense => "expense",
            RecordKind::Income => "income",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinCategory {
    Food,
    Groceries,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    Health,
    Education,
    Travel,
    Other,
}

impl BuiltinCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinCategory::Food => "food",
            BuiltinCategory::Groceries => "groceries",
            BuiltinCategory::Transport => "transport",
            BuiltinCategory::Shopping => "shopping",
            BuiltinCategory::Entertainment => "entertainment",
            BuiltinCategory::Bills => "bills",
            BuiltinCategory::Health => "health",
            BuiltinCategory::Education => "education",
            BuiltinCategory::Travel => "travel",
            BuiltinCategory::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BuiltinCategory::Food => "Food & Dining",
            BuiltinCategory::Groceries => "Groceries",
            BuiltinCategory::Transport => "Transport",
            BuiltinCategory::Shopping => "Shopping",
            BuiltinCategory::Entertainment => "Entertainment",
            BuiltinCategory::Bills => "Bills & Utilities",
            BuiltinCategory::Health => "Health",
            BuiltinCategory::Education => "Education",
            BuiltinCategory::Travel => "Travel",
            BuiltinCategory::Other => "Other",
        }
    }

    pub fn all() -> [BuiltinCategory; 10] {
        [
            BuiltinCategory::Food,
            BuiltinCategory::Groceries,
            BuiltinCategory::Transport,
            BuiltinCategory::Shopping,
            BuiltinCategory::Entertainment,
            BuiltinCategory::Bills,
            BuiltinCategory::Health,
            BuiltinCategory::Education,
            BuiltinCategory::Travel,
            BuiltinCategory::Other,
        ]
    }
}

impl FromStr for BuiltinCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        BuiltinCategory::all()
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| Error::UnknownName {
                what: "category",
                value: s.to_string(),
            })
    }
}

/// Either one of the fixed categories or a user-defined one by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Builtin(BuiltinCategory),
    Custom(RecordId),
}

impl From<BuiltinCategory> for ExpenseCategory {
    fn from(c: BuiltinCategory) -> Self {
        ExpenseCategory::Builtin(c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSource {
    Salary,
    Freelance,
    Business,
    Investment,
    Gift,
    Refund,
    Other,
}

impl IncomeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeSource::Salary => "salary",
            IncomeSource::Freelance => "freelance",
            IncomeSource::Business => "business",
            IncomeSource::Investment => "investment",
            IncomeSource::Gift => "gift",
            IncomeSource::Refund => "refund",
            IncomeSource::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IncomeSource::Salary => "Salary",
            IncomeSource::Freelance => "Freelance",
            IncomeSource::Business => "Business",
            IncomeSource::Investment => "Investment",
            IncomeSource::Gift => "Gift",
            IncomeSource::Refund => "Refund",
            IncomeSource::Other => "Other Income",
        }
    }

    pub fn all() -> [IncomeSource; 7] {
        [
            IncomeSource::Salary,
            IncomeSource::Freelance,
            IncomeSource::Business,
            IncomeSource::Investment,
            IncomeSource::Gift,
            IncomeSource::Refund,
            IncomeSource::Other,
        ]
    }
}

impl FromStr for IncomeSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        IncomeSource::all()
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| Error::UnknownName {
                what: "income source",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub date: NaiveDateTime,
    pub merchant: Option<String>,
    pub note: Option<String>,
    pub tags: BTreeSet<RecordId>,
    /// Recurring template this expense was generated from.
    pub recurring_id: Option<RecordId>,
}

impl Expense {
    /// A new, not yet stored expense; the store assigns the id.
    pub fn new(amount: Decimal, category: impl Into<ExpenseCategory>, date: NaiveDateTime) -> Self {
        Self {
            id: 0,
            amount,
            category: category.into(),
            date,
            merchant: None,
            note: None,
            tags: BTreeSet::new(),
            recurring_id: None,
        }
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = RecordId>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn with_recurring(mut self, template: RecordId) -> Self {
        self.recurring_id = Some(template);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: RecordId,
    pub amount: Decimal,
    pub source: IncomeSource,
    pub date: NaiveDateTime,
    pub note: Option<String>,
    pub recurring_id: Option<RecordId>,
}

impl Income {
    pub fn new(amount: Decimal, source: IncomeSource, date: NaiveDateTime) -> Self {
        Self {
            id: 0,
            amount,
            source,
            date,
            note: None,
            recurring_id: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_recurring(mut self, template: RecordId) -> Self {
        self.recurring_id = Some(template);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub id: RecordId,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: RecordId,
    pub name: String,
    pub color: Option<String>,
}

/// Common view over the two record kinds used by the monthly aggregation.
pub trait Record: Clone {
    type Key: Ord + Clone + fmt::Debug;

    fn id(&self) -> RecordId;
    fn amount(&self) -> Decimal;
    fn date(&self) -> NaiveDateTime;
    fn breakdown_key(&self) -> Self::Key;
}

impl Record for Expense {
    type Key = ExpenseCategory;

    fn id(&self) -> RecordId {
        self.id
    }

    fn amount(&self) -> Decimal {
        self.amount
    }

    fn date(&self) -> NaiveDateTime {
        self.date
    }

    fn breakdown_key(&self) -> ExpenseCategory {
        self.category
    }
}

impl Record for Income {
    type Key = IncomeSource;

    fn id(&self) -> RecordId {
        self.id
    }

    fn amount(&self) -> Decimal {
        self.amount
    }

    fn date(&self) -> NaiveDateTime {
        self.date
    }

    fn breakdown_key(&self) -> IncomeSource {
        self.source
    }
}
