// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Incremental "load more" paging over an already filtered list.

use crate::error::{Error, Result};

pub const PAGE_SIZE: usize = 50;

pub fn visible_count(total: usize, page: usize, page_size: usize) -> usize {
    total.min(page.saturating_add(1).saturating_mul(page_size))
}

pub fn has_more(total: usize, page: usize, page_size: usize) -> bool {
    visible_count(total, page, page_size) < total
}

pub fn visible_page<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    &items[..visible_count(items.len(), page, page_size)]
}

/// Page counter that only moves forward by one or back to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::ZeroPageSize);
        }
        Ok(Self { page: 0, page_size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn visible_count(&self, total: usize) -> usize {
        visible_count(total, self.page, self.page_size)
    }

    pub fn has_more(&self, total: usize) -> bool {
        has_more(total, self.page, self.page_size)
    }

    /// Returns whether the page advanced.
    pub fn load_more(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        visible_page(items, self.page, self.page_size)
    }
}
