// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Merges expenses and incomes into one newest-first transaction list.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::lookup::{Catalog, Display};
use crate::models::{Expense, Income, RecordId, RecordKind};

/// Identifies a row across both kinds; expense and income ids may collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TransactionKey {
    pub kind: RecordKind,
    pub id: RecordId,
}

/// The record a unified row was projected from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Source {
    Expense(Expense),
    Income(Income),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnifiedTransaction {
    pub id: RecordId,
    pub date: NaiveDateTime,
    pub title: String,
    pub subtitle: String,
    /// Negative for expenses.
    pub signed_amount: Decimal,
    pub display: Display,
    pub source: Source,
}

impl UnifiedTransaction {
    pub fn from_expense(expense: &Expense, catalog: &Catalog) -> Self {
        let display = catalog.category_display(&expense.category);
        let title = non_blank(expense.merchant.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| display.name.clone());
        let subtitle = match non_blank(expense.note.as_deref()) {
            Some(note) => format!("{} · {}", display.name, note),
            None => display.name.clone(),
        };
        Self {
            id: expense.id,
            date: expense.date,
            title,
            subtitle,
            signed_amount: -expense.amount,
            display,
            source: Source::Expense(expense.clone()),
        }
    }

    pub fn from_income(income: &Income, catalog: &Catalog) -> Self {
        let display = catalog.source_display(&income.source);
        let subtitle = non_blank(income.note.as_deref())
            .unwrap_or("Income")
            .to_string();
        Self {
            id: income.id,
            date: income.date,
            title: display.name.clone(),
            subtitle,
            signed_amount: income.amount,
            display,
            source: Source::Income(income.clone()),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self.source {
            Source::Expense(_) => RecordKind::Expense,
            Source::Income(_) => RecordKind::Income,
        }
    }

    pub fn key(&self) -> TransactionKey {
        TransactionKey {
            kind: self.kind(),
            id: self.id,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.signed_amount.abs()
    }

    pub fn as_expense(&self) -> Option<&Expense> {
        match &self.source {
            Source::Expense(e) => Some(e),
            Source::Income(_) => None,
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Newest first; on identical timestamps expenses precede incomes, then higher ids first.
pub fn newest_first(a: &UnifiedTransaction, b: &UnifiedTransaction) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| a.kind().cmp(&b.kind()))
        .then_with(|| b.id.cmp(&a.id))
}

pub fn unified_transactions(
    expenses: &[Expense],
    incomes: &[Income],
    catalog: &Catalog,
) -> Vec<UnifiedTransaction> {
    let mut items: Vec<UnifiedTransaction> = expenses
        .iter()
        .map(|e| UnifiedTransaction::from_expense(e, catalog))
        .chain(incomes.iter().map(|i| UnifiedTransaction::from_income(i, catalog)))
        .collect();
    items.sort_by(newest_first);
    items
}
