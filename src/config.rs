// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::errors::Service;
use crate::models::Session;
use anyhow::{Context, Result, anyhow, bail};
use rusqlite::Connection;
use std::collections::BTreeMap;

pub const DEFAULT_EXPENSE_URL: &str = "http://localhost:3003";
pub const DEFAULT_BUDGET_URL: &str = "http://localhost:3001";
pub const DEFAULT_CATEGORY_URL: &str = "http://localhost:3002";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Settings keys accepted by `config set`, with their environment override.
pub const KEYS: [(&str, &str); 5] = [
    ("expense_url", "DOMPET_EXPENSE_URL"),
    ("budget_url", "DOMPET_BUDGET_URL"),
    ("category_url", "DOMPET_CATEGORY_URL"),
    ("user_id", "DOMPET_USER_ID"),
    ("timeout_secs", "DOMPET_TIMEOUT_SECS"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub expense: String,
    pub budget: String,
    pub category: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            expense: DEFAULT_EXPENSE_URL.to_string(),
            budget: DEFAULT_BUDGET_URL.to_string(),
            category: DEFAULT_CATEGORY_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn base(&self, service: Service) -> &str {
        match service {
            Service::Expense => &self.expense,
            Service::Budget => &self.budget,
            Service::Category => &self.category,
        }
    }

    pub fn url(&self, service: Service, path: &str) -> String {
        format!(
            "{}/{}",
            self.base(service).trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoints: Endpoints,
    pub user_id: Option<i64>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            user_id: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load(conn: &Connection) -> Result<Self> {
        let stored = db::all_settings(conn)?;
        Self::from_sources(&stored, |k| std::env::var(k).ok())
    }

    /// Stored settings first, then environment variables on top.
    pub fn from_sources<F>(stored: &BTreeMap<String, String>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        for (key, var) in KEYS {
            let value = env(var)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| stored.get(key).cloned());
            if let Some(v) = value {
                cfg.apply(key, &v)
                    .with_context(|| format!("Invalid value for {}", key))?;
            }
        }
        Ok(cfg)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "expense_url" => self.endpoints.expense = check_url(value)?,
            "budget_url" => self.endpoints.budget = check_url(value)?,
            "category_url" => self.endpoints.category = check_url(value)?,
            "user_id" => {
                self.user_id = Some(
                    value
                        .parse()
                        .with_context(|| format!("'{}' is not a user id", value))?,
                )
            }
            "timeout_secs" => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("'{}' is not a number of seconds", value))?;
                if secs == 0 {
                    bail!("timeout must be at least one second");
                }
                self.timeout_secs = secs;
            }
            other => bail!("Unknown setting '{}'", other),
        }
        Ok(())
    }

    /// Validates `value` for `key` without touching the store.
    pub fn check(key: &str, value: &str) -> Result<()> {
        Config::default().apply(key, value)
    }

    pub fn session(&self) -> Result<Session> {
        self.user_id
            .map(|user_id| Session { user_id })
            .ok_or_else(|| anyhow!("No active session; run `dompet session use <user-id>` first"))
    }
}

fn check_url(value: &str) -> Result<String> {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        bail!("'{}' must start with http:// or https://", value);
    }
    Ok(value.trim_end_matches('/').to_string())
}
