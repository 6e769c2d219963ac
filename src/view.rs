// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly transaction list shared by the home, transactions and dashboard screens.
//!
//! A [`TransactionsView`] owns the month selection, type filter, search,
//! structured filter and page cursor for one screen. It reads both stores
//! through their traits and never mutates records itself except to forward a
//! delete to the owning store.
//!
//! Store notifications only mark the view stale and publish
//! [`ViewEvent::Stale`]; the caller's event loop then calls
//! [`TransactionsView::sync`] on the same turn.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::error::Result;
use crate::filter::{ExpenseFilter, SearchQuery, TypeFilter, apply_filters};
use crate::models::{Expense, Income, RecordKind};
use crate::month::{MonthBounds, YearMonth};
use crate::notify::{Notifier, StoreEvent, Subscription};
use crate::pagination::{PAGE_SIZE, Pagination};
use crate::store::{ExpenseStore, IncomeStore, StoreListener};
use crate::summary::{MonthOverview, MonthSummary};
use crate::unified::{Source, TransactionKey, UnifiedTransaction, unified_transactions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    pub page_size: usize,
    pub search_debounce: Duration,
    pub month_floor: YearMonth,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let config = Config::default();
        Self {
            page_size: PAGE_SIZE,
            search_debounce: SEARCH_DEBOUNCE,
            month_floor: config.month_floor,
        }
    }
}

impl From<&Config> for ViewConfig {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            search_debounce: config.search_debounce(),
            month_floor: config.month_floor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// A store changed underneath the view; call `sync`.
    Stale,
    Refreshed,
    /// Filters, search or page changed without reloading.
    ListChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    /// Nothing recorded for the selected month.
    EmptyStore,
    /// Records exist but none survive the current type filter, search or filter.
    NoMatches,
    Items,
}

pub struct TransactionsView<E: ExpenseStore, I: IncomeStore> {
    expenses: Rc<E>,
    incomes: Rc<I>,
    bounds: MonthBounds,
    month: YearMonth,
    type_filter: TypeFilter,
    search: SearchQuery,
    pending_search: Debouncer<String>,
    filter: ExpenseFilter,
    pagination: Pagination,
    overview: MonthOverview,
    items: Vec<UnifiedTransaction>,
    stale: Rc<Cell<bool>>,
    subscriptions: Vec<Subscription>,
    events: Rc<Notifier<ViewEvent>>,
}

impl<E: ExpenseStore, I: IncomeStore> TransactionsView<E, I> {
    pub fn new(expenses: Rc<E>, incomes: Rc<I>, config: ViewConfig) -> Result<Self> {
        let current = YearMonth::current();
        Ok(Self {
            expenses,
            incomes,
            bounds: MonthBounds::new(config.month_floor, current),
            month: current,
            type_filter: TypeFilter::All,
            search: SearchQuery::default(),
            pending_search: Debouncer::new(config.search_debounce),
            filter: ExpenseFilter::default(),
            pagination: Pagination::new(config.page_size)?,
            overview: MonthOverview {
                expenses: MonthSummary::empty(current),
                incomes: MonthSummary::empty(current),
            },
            items: Vec::new(),
            stale: Rc::new(Cell::new(true)),
            subscriptions: Vec::new(),
            events: Rc::new(Notifier::new()),
        })
    }

    /// Pins "today's" month, which caps forward navigation, and selects it.
    pub fn with_current_month(mut self, current: YearMonth) -> Self {
        self.bounds.current = current;
        self.month = current;
        self
    }

    pub fn attach(&mut self) -> Result<()> {
        if self.is_attached() {
            return self.refresh();
        }
        let expense_sub = self.expenses.subscribe_expenses(mark_stale(
            Rc::clone(&self.stale),
            Rc::clone(&self.events),
        ));
        let income_sub = self.incomes.subscribe_incomes(mark_stale(
            Rc::clone(&self.stale),
            Rc::clone(&self.events),
        ));
        self.subscriptions.push(expense_sub);
        self.subscriptions.push(income_sub);
        info!(month = %self.month, "transactions view attached");
        self.refresh()
    }

    pub fn detach(&mut self) {
        if self.subscriptions.is_empty() && !self.pending_search.is_pending() {
            return;
        }
        self.subscriptions.clear();
        self.pending_search.cancel();
        info!(month = %self.month, "transactions view detached");
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    /// Renderer-facing change events.
    pub fn subscribe(&self, listener: impl Fn(&ViewEvent) + 'static) -> Subscription {
        self.events.subscribe(listener)
    }

    /// Full recompute of both summaries and the merged list.
    pub fn refresh(&mut self) -> Result<()> {
        let expenses = self.expenses.expense_summary(self.month)?;
        let incomes = self.incomes.income_summary(self.month)?;
        let catalog = self.expenses.catalog()?;
        self.items = unified_transactions(&expenses.records, &incomes.records, &catalog);
        self.overview = MonthOverview { expenses, incomes };
        self.stale.set(false);
        debug!(month = %self.month, items = self.items.len(), "transactions view refreshed");
        self.events.notify(&ViewEvent::Refreshed);
        Ok(())
    }

    /// Recomputes if a store reported a change since the last refresh.
    pub fn sync(&mut self) -> Result<bool> {
        if !self.stale.get() {
            return Ok(false);
        }
        self.refresh()?;
        Ok(true)
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn bounds(&self) -> MonthBounds {
        self.bounds
    }

    pub fn can_go_next(&self) -> bool {
        self.bounds.next(self.month).is_some()
    }

    pub fn set_month(&mut self, month: YearMonth) -> Result<()> {
        let month = self.bounds.jump(month)?;
        self.change_month(month)
    }

    /// No-op returning `false` once the current month is selected.
    pub fn next_month(&mut self) -> Result<bool> {
        match self.bounds.next(self.month) {
            Some(month) => {
                self.change_month(month)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn previous_month(&mut self) -> Result<()> {
        let month = self.bounds.prev(self.month);
        self.change_month(month)
    }

    fn change_month(&mut self, month: YearMonth) -> Result<()> {
        self.month = month;
        self.pagination.reset();
        self.refresh()
    }

    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        if self.type_filter == type_filter {
            return;
        }
        self.type_filter = type_filter;
        self.list_changed();
    }

    pub fn search(&self) -> &SearchQuery {
        &self.search
    }

    /// Applies a query immediately, dropping any debounced keystrokes.
    pub fn set_search(&mut self, raw: &str) {
        self.pending_search.cancel();
        self.apply_search(raw);
    }

    /// Records a keystroke; the query is applied by `tick` after the quiet window.
    pub fn type_search(&mut self, raw: &str, now: Instant) {
        self.pending_search.push(raw.to_string(), now);
    }

    /// Drives the search debounce. Returns whether the applied query changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending_search.poll(now) {
            Some(raw) => self.apply_search(&raw),
            None => false,
        }
    }

    pub fn search_pending(&self) -> bool {
        self.pending_search.is_pending()
    }

    fn apply_search(&mut self, raw: &str) -> bool {
        let query = SearchQuery::new(raw);
        if query == self.search {
            return false;
        }
        self.search = query;
        self.list_changed();
        true
    }

    pub fn filter(&self) -> &ExpenseFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: ExpenseFilter) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.list_changed();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(ExpenseFilter::default());
    }

    fn list_changed(&mut self) {
        self.pagination.reset();
        self.events.notify(&ViewEvent::ListChanged);
    }

    /// Search or structured filter in effect; paging is off while true.
    pub fn is_narrowed(&self) -> bool {
        self.search.is_active() || self.filter.is_active()
    }

    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    pub fn load_more(&mut self) -> bool {
        if self.is_narrowed() {
            return false;
        }
        let total = self.matching().len();
        let advanced = self.pagination.load_more(total);
        if advanced {
            self.events.notify(&ViewEvent::ListChanged);
        }
        advanced
    }

    /// Everything in the month, newest first, before any filtering.
    pub fn items(&self) -> &[UnifiedTransaction] {
        &self.items
    }

    pub fn matching(&self) -> Vec<&UnifiedTransaction> {
        apply_filters(&self.items, self.type_filter, &self.search, &self.filter)
    }

    pub fn visible(&self) -> Vec<&UnifiedTransaction> {
        let mut rows = self.matching();
        if !self.is_narrowed() {
            rows.truncate(self.pagination.visible_count(rows.len()));
        }
        rows
    }

    pub fn visible_count(&self) -> usize {
        let total = self.matching().len();
        if self.is_narrowed() {
            total
        } else {
            self.pagination.visible_count(total)
        }
    }

    pub fn has_more(&self) -> bool {
        !self.is_narrowed() && self.pagination.has_more(self.matching().len())
    }

    pub fn display_state(&self) -> DisplayState {
        if self.items.is_empty() {
            DisplayState::EmptyStore
        } else if self.matching().is_empty() {
            DisplayState::NoMatches
        } else {
            DisplayState::Items
        }
    }

    pub fn overview(&self) -> &MonthOverview {
        &self.overview
    }

    pub fn expense_summary(&self) -> &MonthSummary<Expense> {
        &self.overview.expenses
    }

    pub fn income_summary(&self) -> &MonthSummary<Income> {
        &self.overview.incomes
    }

    /// The record behind a row, for the edit flow.
    pub fn on_transaction_tap(&self, key: TransactionKey) -> Option<&Source> {
        self.items
            .iter()
            .find(|t| t.key() == key)
            .map(|t| &t.source)
    }

    /// Forwards the delete to the owning store, then refreshes whether or
    /// not it succeeded as long as the view is still attached.
    pub fn on_transaction_delete(&mut self, key: TransactionKey) -> Result<()> {
        let result = match key.kind {
            RecordKind::Expense => self.expenses.delete_expense(key.id),
            RecordKind::Income => self.incomes.delete_income(key.id),
        };
        if let Err(err) = &result {
            warn!(kind = %key.kind, id = key.id, "delete failed: {err}");
        }
        if !self.is_attached() {
            return result;
        }
        let refreshed = self.refresh();
        result?;
        refreshed
    }
}

fn mark_stale(stale: Rc<Cell<bool>>, events: Rc<Notifier<ViewEvent>>) -> StoreListener {
    Box::new(move |event: &StoreEvent| {
        debug!(kind = %event.kind, id = event.id, "store change observed");
        stale.set(true);
        events.notify(&ViewEvent::Stale);
    })
}

impl<E: ExpenseStore, I: IncomeStore> Drop for TransactionsView<E, I> {
    fn drop(&mut self) {
        self.detach();
    }
}
