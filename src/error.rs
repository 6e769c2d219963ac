// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{RecordId, RecordKind};
use crate::month::YearMonth;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Invalid month '{0}', expected YYYY-MM")]
    MalformedMonth(String),

    #[error("Month {target} is outside the selectable range {floor}..={current}")]
    MonthOutOfRange {
        target: YearMonth,
        floor: YearMonth,
        current: YearMonth,
    },

    #[error("Date range starts {start} after it ends {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Amount range minimum {min} exceeds maximum {max}")]
    InvalidAmountRange { min: Decimal, max: Decimal },

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("Unknown {what} '{value}'")]
    UnknownName { what: &'static str, value: String },

    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    #[error("Invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: RecordId },

    #[error("No {what} with id {id}")]
    MissingEntry { what: &'static str, id: RecordId },

    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    #[error("Unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("Invalid value '{value}' for setting '{key}'")]
    InvalidSetting { key: String, value: String },

    #[error("Malformed {column} '{value}' in database")]
    Corrupt { column: &'static str, value: String },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
