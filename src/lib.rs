// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod lookup;
pub mod models;
pub mod month;
pub mod notify;
pub mod pagination;
pub mod store;
pub mod summary;
pub mod unified;
pub mod utils;
pub mod view;

pub use error::{Error, Result};
