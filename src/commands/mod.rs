// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod chart;
pub mod config;
pub mod expenses;
pub mod exporter;
pub mod session;

use crate::api::Backend;
use crate::config::Config;
use crate::models::Period;
use anyhow::Result;
use rusqlite::Connection;

/// What every handler works against.
pub struct Context<'a> {
    pub conn: &'a Connection,
    pub backend: &'a dyn Backend,
    pub config: &'a Config,
}

/// `--month/--year`, each defaulting to the current month.
pub fn period_from(sub: &clap::ArgMatches) -> Result<Period> {
    let now = Period::current();
    let month = sub.get_one::<u32>("month").copied().unwrap_or(now.month());
    let year = sub.get_one::<i32>("year").copied().unwrap_or(now.year());
    Ok(Period::new(month, year)?)
}

pub fn page_from(sub: &clap::ArgMatches) -> usize {
    sub.get_one::<usize>("page").copied().unwrap_or(1)
}
