// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Config, KEYS};
use crate::db;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap().trim();
            Config::check(key, value)?;
            db::set_setting(conn, key, value)?;
            println!("{} = {}", key, value);
        }
        Some(("show", _)) => {
            let cfg = Config::load(conn)?;
            let stored = db::all_settings(conn)?;
            let effective = [
                cfg.endpoints.expense.clone(),
                cfg.endpoints.budget.clone(),
                cfg.endpoints.category.clone(),
                cfg.user_id.map(|u| u.to_string()).unwrap_or_default(),
                cfg.timeout_secs.to_string(),
            ];
            let rows = KEYS
                .iter()
                .zip(effective)
                .map(|((key, var), value)| {
                    let origin = if std::env::var(var).is_ok_and(|v| !v.trim().is_empty()) {
                        format!("env {}", var)
                    } else if stored.contains_key(*key) {
                        "stored".to_string()
                    } else {
                        "default".to_string()
                    };
                    vec![key.to_string(), value, origin]
                })
                .collect();
            println!("{}", pretty_table(&["Key", "Value", "From"], rows));
        }
        _ => {}
    }
    Ok(())
}
