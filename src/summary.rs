// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-month totals, category/source breakdowns and spending pace.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Expense, Income, Record};
use crate::month::YearMonth;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary<T: Record> {
    pub month: YearMonth,
    /// Newest first.
    pub records: Vec<T>,
    pub total: Decimal,
    pub count: usize,
    pub breakdown: BTreeMap<T::Key, Decimal>,
}

impl<T: Record> MonthSummary<T> {
    pub fn empty(month: YearMonth) -> Self {
        Self {
            month,
            records: Vec::new(),
            total: Decimal::ZERO,
            count: 0,
            breakdown: BTreeMap::new(),
        }
    }

    /// Full recompute; records dated outside `month` are ignored.
    pub fn build(month: YearMonth, records: impl IntoIterator<Item = T>) -> Self {
        let mut records: Vec<T> = records
            .into_iter()
            .filter(|r| month.contains(r.date()))
            .collect();
        records.sort_by(|a, b| b.date().cmp(&a.date()).then_with(|| b.id().cmp(&a.id())));

        let mut total = Decimal::ZERO;
        let mut breakdown: BTreeMap<T::Key, Decimal> = BTreeMap::new();
        for r in &records {
            total += r.amount();
            *breakdown.entry(r.breakdown_key()).or_insert(Decimal::ZERO) += r.amount();
        }
        Self {
            month,
            count: records.len(),
            records,
            total,
            breakdown,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Breakdown entries, largest first.
    pub fn ranked(&self) -> Vec<(T::Key, Decimal)> {
        let mut items: Vec<_> = self
            .breakdown
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        items
    }

    /// Percentage of the total per key at 2dp. The largest bucket absorbs the
    /// rounding remainder so the shares always add up to exactly 100.
    pub fn shares(&self) -> BTreeMap<T::Key, Decimal> {
        let mut shares = BTreeMap::new();
        if self.total.is_zero() {
            return shares;
        }
        let hundred = Decimal::ONE_HUNDRED;
        let mut sum = Decimal::ZERO;
        for (k, v) in &self.breakdown {
            let pct = (*v * hundred / self.total).round_dp(2);
            sum += pct;
            shares.insert(k.clone(), pct);
        }
        let drift = hundred - sum;
        if !drift.is_zero() {
            let largest = self
                .breakdown
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(k, _)| k.clone());
            if let Some(pct) = largest.and_then(|k| shares.get_mut(&k)) {
                *pct += drift;
            }
        }
        shares
    }

    pub fn pace(&self, today: NaiveDate) -> Pace {
        Pace::compute(self.month, self.total, today)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pace {
    pub days_elapsed: u32,
    pub days_in_month: u32,
    pub daily_average: Decimal,
    pub projected_total: Decimal,
}

impl Pace {
    pub fn compute(month: YearMonth, total: Decimal, today: NaiveDate) -> Self {
        let days_in_month = month.days_in_month();
        let days_elapsed = match YearMonth::of(today).cmp(&month) {
            Ordering::Less => 0,
            Ordering::Equal => today.day(),
            Ordering::Greater => days_in_month,
        };
        if days_elapsed == 0 {
            return Self {
                days_elapsed,
                days_in_month,
                daily_average: Decimal::ZERO,
                projected_total: total,
            };
        }
        let elapsed = Decimal::from(days_elapsed);
        Self {
            days_elapsed,
            days_in_month,
            daily_average: (total / elapsed).round_dp(2),
            projected_total: (total * Decimal::from(days_in_month) / elapsed).round_dp(2),
        }
    }
}

/// Both kinds for one month, as the dashboard shows them.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthOverview {
    pub expenses: MonthSummary<Expense>,
    pub incomes: MonthSummary<Income>,
}

impl MonthOverview {
    pub fn month(&self) -> YearMonth {
        self.expenses.month
    }

    pub fn net(&self) -> Decimal {
        self.incomes.total - self.expenses.total
    }

    /// Share of income kept this month, `None` without income.
    pub fn savings_rate(&self) -> Option<Decimal> {
        if self.incomes.total.is_zero() {
            return None;
        }
        Some((self.net() * Decimal::ONE_HUNDRED / self.incomes.total).round_dp(1))
    }
}
