// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record stores consumed by the view model.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::lookup::Catalog;
use crate::models::{Expense, Income, RecordId};
use crate::month::YearMonth;
use crate::notify::{StoreEvent, Subscription};
use crate::summary::MonthSummary;

pub type StoreListener = Box<dyn Fn(&StoreEvent)>;

/// User-defined categories and tags.
pub trait CatalogStore {
    fn catalog(&self) -> Result<Catalog>;
    fn add_category(&self, name: &str, icon: Option<&str>, color: Option<&str>)
    -> Result<RecordId>;
    /// Expenses keep the id of a removed category.
    fn remove_category(&self, id: RecordId) -> Result<()>;
    fn add_tag(&self, name: &str, color: Option<&str>) -> Result<RecordId>;
    /// Also detaches the tag from every expense.
    fn remove_tag(&self, id: RecordId) -> Result<()>;
}

pub trait ExpenseStore: CatalogStore {
    fn expense_summary(&self, month: YearMonth) -> Result<MonthSummary<Expense>>;
    fn add_expense(&self, expense: Expense) -> Result<RecordId>;
    fn update_expense(&self, expense: &Expense) -> Result<()>;
    fn delete_expense(&self, id: RecordId) -> Result<()>;
    fn subscribe_expenses(&self, listener: StoreListener) -> Subscription;
}

pub trait IncomeStore {
    fn income_summary(&self, month: YearMonth) -> Result<MonthSummary<Income>>;
    fn add_income(&self, income: Income) -> Result<RecordId>;
    fn update_income(&self, income: &Income) -> Result<()>;
    fn delete_income(&self, id: RecordId) -> Result<()>;
    fn subscribe_incomes(&self, listener: StoreListener) -> Subscription;
}

pub(crate) fn ensure_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::NonPositiveAmount(amount));
    }
    Ok(())
}

pub(crate) fn clean_name(what: &'static str, name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::EmptyName(what));
    }
    Ok(name.to_string())
}
