// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("use", sub)) => {
            let user_id = *sub.get_one::<i64>("user_id").unwrap();
            db::set_setting(conn, "user_id", &user_id.to_string())?;
            println!("Acting as user {}", user_id);
        }
        Some(("show", _)) => match db::get_setting(conn, "user_id")? {
            Some(id) => println!("Acting as user {}", id),
            None => println!("No active session"),
        },
        Some(("clear", _)) => {
            if db::delete_setting(conn, "user_id")? {
                println!("Session cleared");
            } else {
                println!("No active session");
            }
        }
        _ => {}
    }
    Ok(())
}
