// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use tracing::debug;

use super::{
    CatalogStore, ExpenseStore, IncomeStore, StoreListener, clean_name, ensure_positive,
};
use crate::error::{Error, Result};
use crate::lookup::{Catalog, parse_color};
use crate::models::{
    CustomCategory, Expense, ExpenseCategory, Income, RecordId, RecordKind, Tag,
};
use crate::month::YearMonth;
use crate::notify::{Change, Notifier, StoreEvent, Subscription};
use crate::summary::MonthSummary;

/// Keeps everything in memory; ids are shared across all record types.
#[derive(Debug, Default)]
pub struct MemoryStore {
    expenses: RefCell<BTreeMap<RecordId, Expense>>,
    incomes: RefCell<BTreeMap<RecordId, Income>>,
    categories: RefCell<BTreeMap<RecordId, CustomCategory>>,
    tags: RefCell<BTreeMap<RecordId, Tag>>,
    last_id: Cell<RecordId>,
    expense_events: Notifier<StoreEvent>,
    income_events: Notifier<StoreEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> RecordId {
        let id = self.last_id.get() + 1;
        self.last_id.set(id);
        id
    }

    fn emit_expense(&self, change: Change, id: RecordId) {
        debug!(?change, id, "expense changed");
        self.expense_events.notify(&StoreEvent {
            kind: RecordKind::Expense,
            change,
            id,
        });
    }

    fn emit_income(&self, change: Change, id: RecordId) {
        debug!(?change, id, "income changed");
        self.income_events.notify(&StoreEvent {
            kind: RecordKind::Income,
            change,
            id,
        });
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.borrow().len()
    }

    pub fn income_count(&self) -> usize {
        self.incomes.borrow().len()
    }

    pub fn expense_listeners(&self) -> usize {
        self.expense_events.listener_count()
    }

    pub fn income_listeners(&self) -> usize {
        self.income_events.listener_count()
    }
}

impl CatalogStore for MemoryStore {
    fn catalog(&self) -> Result<Catalog> {
        Ok(Catalog::new(
            self.categories.borrow().values().cloned(),
            self.tags.borrow().values().cloned(),
        ))
    }

    fn add_category(
        &self,
        name: &str,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> Result<RecordId> {
        let name = clean_name("category", name)?;
        let color = parse_color(color)?;
        let id = self.allocate_id();
        self.categories.borrow_mut().insert(
            id,
            CustomCategory {
                id,
                name,
                icon: icon.map(str::to_string),
                color,
            },
        );
        Ok(id)
    }

    fn remove_category(&self, id: RecordId) -> Result<()> {
        if self.categories.borrow_mut().remove(&id).is_none() {
            return Err(Error::MissingEntry {
                what: "category",
                id,
            });
        }
        let touched: Vec<RecordId> = self
            .expenses
            .borrow()
            .values()
            .filter(|e| e.category == ExpenseCategory::Custom(id))
            .map(|e| e.id)
            .collect();
        for expense_id in touched {
            self.emit_expense(Change::Updated, expense_id);
        }
        Ok(())
    }

    fn add_tag(&self, name: &str, color: Option<&str>) -> Result<RecordId> {
        let name = clean_name("tag", name)?;
        let color = parse_color(color)?;
        let id = self.allocate_id();
        self.tags.borrow_mut().insert(id, Tag { id, name, color });
        Ok(id)
    }

    fn remove_tag(&self, id: RecordId) -> Result<()> {
        if self.tags.borrow_mut().remove(&id).is_none() {
            return Err(Error::MissingEntry { what: "tag", id });
        }
        let touched: Vec<RecordId> = self
            .expenses
            .borrow_mut()
            .values_mut()
            .filter_map(|e| e.tags.remove(&id).then_some(e.id))
            .collect();
        for expense_id in touched {
            self.emit_expense(Change::Updated, expense_id);
        }
        Ok(())
    }
}

impl ExpenseStore for MemoryStore {
    fn expense_summary(&self, month: YearMonth) -> Result<MonthSummary<Expense>> {
        Ok(MonthSummary::build(
            month,
            self.expenses.borrow().values().cloned(),
        ))
    }

    fn add_expense(&self, mut expense: Expense) -> Result<RecordId> {
        ensure_positive(expense.amount)?;
        let id = self.allocate_id();
        expense.id = id;
        self.expenses.borrow_mut().insert(id, expense);
        self.emit_expense(Change::Inserted, id);
        Ok(id)
    }

    fn update_expense(&self, expense: &Expense) -> Result<()> {
        ensure_positive(expense.amount)?;
        {
            let mut expenses = self.expenses.borrow_mut();
            let slot = expenses.get_mut(&expense.id).ok_or(Error::NotFound {
                kind: RecordKind::Expense,
                id: expense.id,
            })?;
            *slot = expense.clone();
        }
        self.emit_expense(Change::Updated, expense.id);
        Ok(())
    }

    fn delete_expense(&self, id: RecordId) -> Result<()> {
        let removed = self.expenses.borrow_mut().remove(&id);
        if removed.is_none() {
            return Err(Error::NotFound {
                kind: RecordKind::Expense,
                id,
            });
        }
        self.emit_expense(Change::Deleted, id);
        Ok(())
    }

    fn subscribe_expenses(&self, listener: StoreListener) -> Subscription {
        self.expense_events.subscribe(listener)
    }
}

impl IncomeStore for MemoryStore {
    fn income_summary(&self, month: YearMonth) -> Result<MonthSummary<Income>> {
        Ok(MonthSummary::build(
            month,
            self.incomes.borrow().values().cloned(),
        ))
    }

    fn add_income(&self, mut income: Income) -> Result<RecordId> {
        ensure_positive(income.amount)?;
        let id = self.allocate_id();
        income.id = id;
        self.incomes.borrow_mut().insert(id, income);
        self.emit_income(Change::Inserted, id);
        Ok(id)
    }

    fn update_income(&self, income: &Income) -> Result<()> {
        ensure_positive(income.amount)?;
        {
            let mut incomes = self.incomes.borrow_mut();
            let slot = incomes.get_mut(&income.id).ok_or(Error::NotFound {
                kind: RecordKind::Income,
                id: income.id,
            })?;
            *slot = income.clone();
        }
        self.emit_income(Change::Updated, income.id);
        Ok(())
    }

    fn delete_income(&self, id: RecordId) -> Result<()> {
        let removed = self.incomes.borrow_mut().remove(&id);
        if removed.is_none() {
            return Err(Error::NotFound {
                kind: RecordKind::Income,
                id,
            });
        }
        self.emit_income(Change::Deleted, id);
        Ok(())
    }

    fn subscribe_incomes(&self, listener: StoreListener) -> Subscription {
        self.income_events.subscribe(listener)
    }
}
