// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, ToSql, params};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::{
    CatalogStore, ExpenseStore, IncomeStore, StoreListener, clean_name, ensure_positive,
};
use crate::db::{self, format_datetime, parse_stored_datetime};
use crate::error::{Error, Result};
use crate::lookup::{Catalog, parse_color};
use crate::models::{
    CustomCategory, Expense, ExpenseCategory, Income, IncomeSource, RecordId, RecordKind, Tag,
};
use crate::month::YearMonth;
use crate::notify::{Change, Notifier, StoreEvent, Subscription};
use crate::summary::MonthSummary;

const CUSTOM: &str = "custom";

pub struct SqliteStore {
    conn: Connection,
    expense_events: Notifier<StoreEvent>,
    income_events: Notifier<StoreEvent>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Result<Self> {
        db::init_schema(&conn)?;
        Ok(Self {
            conn,
            expense_events: Notifier::new(),
            income_events: Notifier::new(),
        })
    }

    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "opening store");
        Self::new(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn emit(&self, kind: RecordKind, change: Change, id: RecordId) {
        debug!(%kind, ?change, id, "record changed");
        let event = StoreEvent { kind, change, id };
        match kind {
            RecordKind::Expense => self.expense_events.notify(&event),
            RecordKind::Income => self.income_events.notify(&event),
        }
    }

    /// Bare dates so both `YYYY-MM-DD` and full timestamps compare correctly as text.
    fn month_bounds(month: YearMonth) -> (String, String) {
        (
            month.first_day().to_string(),
            month.next().first_day().to_string(),
        )
    }

    fn write_tags(&self, expense_id: RecordId, tags: &BTreeSet<RecordId>) -> Result<()> {
        self.conn.execute(
            "DELETE FROM expense_tags WHERE expense_id=?1",
            params![expense_id],
        )?;
        let mut stmt = self
            .conn
            .prepare("INSERT INTO expense_tags(expense_id, tag_id) VALUES (?1, ?2)")?;
        for tag in tags {
            stmt.execute(params![expense_id, tag])?;
        }
        Ok(())
    }
}

fn category_columns(category: &ExpenseCategory) -> (&'static str, Option<RecordId>) {
    match category {
        ExpenseCategory::Builtin(b) => (b.as_str(), None),
        ExpenseCategory::Custom(id) => (CUSTOM, Some(*id)),
    }
}

fn decode_category(raw: &str, custom_id: Option<RecordId>) -> Result<ExpenseCategory> {
    match (raw, custom_id) {
        (CUSTOM, Some(id)) => Ok(ExpenseCategory::Custom(id)),
        (other, _) => other
            .parse()
            .map(ExpenseCategory::Builtin)
            .map_err(|_| Error::Corrupt {
                column: "expenses.category",
                value: raw.to_string(),
            }),
    }
}

fn decode_amount(column: &'static str, raw: String) -> Result<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|_| Error::Corrupt { column, value: raw })
}

fn decode_date(column: &'static str, raw: String) -> Result<chrono::NaiveDateTime> {
    parse_stored_datetime(raw.trim()).ok_or(Error::Corrupt { column, value: raw })
}

impl CatalogStore for SqliteStore {
    fn catalog(&self) -> Result<Catalog> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, icon, color FROM custom_categories ORDER BY name")?;
        let categories = stmt
            .query_map([], |r| {
                Ok(CustomCategory {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    icon: r.get(2)?,
                    color: r.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color FROM tags ORDER BY name")?;
        let tags = stmt
            .query_map([], |r| {
                Ok(Tag {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    color: r.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Catalog::new(categories, tags))
    }

    fn add_category(
        &self,
        name: &str,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> Result<RecordId> {
        let name = clean_name("category", name)?;
        let color = parse_color(color)?;
        self.conn.execute(
            "INSERT INTO custom_categories(name, icon, color) VALUES (?1, ?2, ?3)",
            params![name, icon, color],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn remove_category(&self, id: RecordId) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM custom_categories WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::MissingEntry {
                what: "category",
                id,
            });
        }
        let mut stmt = self.conn.prepare(
            "SELECT id FROM expenses WHERE category=?1 AND custom_category_id=?2 ORDER BY id",
        )?;
        let touched = stmt
            .query_map(params![CUSTOM, id], |r| r.get::<_, RecordId>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        // Rows keep the dangling id and now render as uncategorized.
        for expense_id in touched {
            self.emit(RecordKind::Expense, Change::Updated, expense_id);
        }
        Ok(())
    }

    fn add_tag(&self, name: &str, color: Option<&str>) -> Result<RecordId> {
        let name = clean_name("tag", name)?;
        let color = parse_color(color)?;
        self.conn.execute(
            "INSERT INTO tags(name, color) VALUES (?1, ?2)",
            params![name, color],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn remove_tag(&self, id: RecordId) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare("SELECT expense_id FROM expense_tags WHERE tag_id=?1")?;
        let touched = stmt
            .query_map(params![id], |r| r.get::<_, RecordId>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let n = self
            .conn
            .execute("DELETE FROM tags WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::MissingEntry { what: "tag", id });
        }
        // expense_tags rows go with the tag via ON DELETE CASCADE.
        for expense_id in touched {
            self.emit(RecordKind::Expense, Change::Updated, expense_id);
        }
        Ok(())
    }
}

impl ExpenseStore for SqliteStore {
    fn expense_summary(&self, month: YearMonth) -> Result<MonthSummary<Expense>> {
        let (start, end) = Self::month_bounds(month);
        let expenses = self.query_expenses("e.date >= ?1 AND e.date < ?2", params![start, end])?;
        Ok(MonthSummary::build(month, expenses))
    }

    fn add_expense(&self, expense: Expense) -> Result<RecordId> {
        ensure_positive(expense.amount)?;
        let (category, custom_id) = category_columns(&expense.category);
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO expenses(date, amount, category, custom_category_id, merchant, note, recurring_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                format_datetime(&expense.date),
                expense.amount.to_string(),
                category,
                custom_id,
                expense.merchant,
                expense.note,
                expense.recurring_id
            ],
        )?;
        let id = tx.last_insert_rowid();
        self.write_tags(id, &expense.tags)?;
        tx.commit()?;
        self.emit(RecordKind::Expense, Change::Inserted, id);
        Ok(id)
    }

    fn update_expense(&self, expense: &Expense) -> Result<()> {
        ensure_positive(expense.amount)?;
        let (category, custom_id) = category_columns(&expense.category);
        let tx = self.conn.unchecked_transaction()?;
        let n = tx.execute(
            "UPDATE expenses SET date=?1, amount=?2, category=?3, custom_category_id=?4,
             merchant=?5, note=?6, recurring_id=?7 WHERE id=?8",
            params![
                format_datetime(&expense.date),
                expense.amount.to_string(),
                category,
                custom_id,
                expense.merchant,
                expense.note,
                expense.recurring_id,
                expense.id
            ],
        )?;
        if n == 0 {
            return Err(Error::NotFound {
                kind: RecordKind::Expense,
                id: expense.id,
            });
        }
        self.write_tags(expense.id, &expense.tags)?;
        tx.commit()?;
        self.emit(RecordKind::Expense, Change::Updated, expense.id);
        Ok(())
    }

    fn delete_expense(&self, id: RecordId) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM expenses WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::NotFound {
                kind: RecordKind::Expense,
                id,
            });
        }
        self.emit(RecordKind::Expense, Change::Deleted, id);
        Ok(())
    }

    fn subscribe_expenses(&self, listener: StoreListener) -> Subscription {
        self.expense_events.subscribe(listener)
    }
}

impl IncomeStore for SqliteStore {
    fn income_summary(&self, month: YearMonth) -> Result<MonthSummary<Income>> {
        let (start, end) = Self::month_bounds(month);
        let mut stmt = self.conn.prepare(
            "SELECT id, date, amount, source, note, recurring_id
             FROM incomes WHERE date >= ?1 AND date < ?2",
        )?;
        let mut rows = stmt.query(params![start, end])?;
        let mut incomes = Vec::new();
        while let Some(r) = rows.next()? {
            let source: String = r.get(3)?;
            incomes.push(Income {
                id: r.get(0)?,
                date: decode_date("incomes.date", r.get(1)?)?,
                amount: decode_amount("incomes.amount", r.get(2)?)?,
                source: source.parse::<IncomeSource>().map_err(|_| Error::Corrupt {
                    column: "incomes.source",
                    value: source.clone(),
                })?,
                note: r.get(4)?,
                recurring_id: r.get(5)?,
            });
        }
        Ok(MonthSummary::build(month, incomes))
    }

    fn add_income(&self, income: Income) -> Result<RecordId> {
        ensure_positive(income.amount)?;
        self.conn.execute(
            "INSERT INTO incomes(date, amount, source, note, recurring_id) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                format_datetime(&income.date),
                income.amount.to_string(),
                income.source.as_str(),
                income.note,
                income.recurring_id
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.emit(RecordKind::Income, Change::Inserted, id);
        Ok(id)
    }

    fn update_income(&self, income: &Income) -> Result<()> {
        ensure_positive(income.amount)?;
        let n = self.conn.execute(
            "UPDATE incomes SET date=?1, amount=?2, source=?3, note=?4, recurring_id=?5 WHERE id=?6",
            params![
                format_datetime(&income.date),
                income.amount.to_string(),
                income.source.as_str(),
                income.note,
                income.recurring_id,
                income.id
            ],
        )?;
        if n == 0 {
            return Err(Error::NotFound {
                kind: RecordKind::Income,
                id: income.id,
            });
        }
        self.emit(RecordKind::Income, Change::Updated, income.id);
        Ok(())
    }

    fn delete_income(&self, id: RecordId) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM incomes WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::NotFound {
                kind: RecordKind::Income,
                id,
            });
        }
        self.emit(RecordKind::Income, Change::Deleted, id);
        Ok(())
    }

    fn subscribe_incomes(&self, listener: StoreListener) -> Subscription {
        self.income_events.subscribe(listener)
    }
}

impl SqliteStore {
    pub fn find_expense(&self, id: RecordId) -> Result<Option<Expense>> {
        Ok(self.query_expenses("e.id = ?1", params![id])?.pop())
    }

    fn query_expenses(&self, condition: &str, args: &[&dyn ToSql]) -> Result<Vec<Expense>> {
        let mut tag_stmt = self.conn.prepare(&format!(
            "SELECT et.expense_id, et.tag_id FROM expense_tags et
             JOIN expenses e ON e.id=et.expense_id WHERE {condition}"
        ))?;
        let mut tags: BTreeMap<RecordId, BTreeSet<RecordId>> = BTreeMap::new();
        let mut rows = tag_stmt.query(args)?;
        while let Some(r) = rows.next()? {
            let expense_id: RecordId = r.get(0)?;
            let tag_id: RecordId = r.get(1)?;
            tags.entry(expense_id).or_default().insert(tag_id);
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT e.id, e.date, e.amount, e.category, e.custom_category_id, e.merchant, e.note, e.recurring_id
             FROM expenses e WHERE {condition}"
        ))?;
        let mut rows = stmt.query(args)?;
        let mut expenses = Vec::new();
        while let Some(r) = rows.next()? {
            let id: RecordId = r.get(0)?;
            let category: String = r.get(3)?;
            expenses.push(Expense {
                id,
                date: decode_date("expenses.date", r.get(1)?)?,
                amount: decode_amount("expenses.amount", r.get(2)?)?,
                category: decode_category(&category, r.get(4)?)?,
                merchant: r.get(5)?,
                note: r.get(6)?,
                tags: tags.remove(&id).unwrap_or_default(),
                recurring_id: r.get(7)?,
            });
        }
        Ok(expenses)
    }

    /// Setting value by key, `None` when unset.
    pub fn setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}
