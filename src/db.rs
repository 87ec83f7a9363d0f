// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local key-value store: settings, custom category names and chart colours.
//! Nothing here is a source of truth for the backend's data.

use crate::aggregate::ColorOverrides;
use crate::models::Color;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Dompet", "dompet"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("dompet.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS custom_categories(
        name TEXT PRIMARY KEY COLLATE NOCASE,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS color_overrides(
        category TEXT PRIMARY KEY,
        color TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete_setting(conn: &Connection, key: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
    Ok(n > 0)
}

pub fn all_settings(conn: &Connection) -> Result<BTreeMap<String, String>> {
    let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
    let mut out = BTreeMap::new();
    for row in rows {
        let (k, v) = row?;
        out.insert(k, v);
    }
    Ok(out)
}

/// Custom category names in the order they were first typed.
pub fn custom_categories(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT name FROM custom_categories ORDER BY created_at, rowid")?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Returns false when the name was already cached (case-insensitive).
pub fn remember_category(conn: &Connection, name: &str) -> Result<bool> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO custom_categories(name) VALUES (?1)",
        params![name.trim()],
    )?;
    Ok(n > 0)
}

pub fn forget_category(conn: &Connection, name: &str) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM custom_categories WHERE name=?1",
        params![name.trim()],
    )?;
    Ok(n > 0)
}

pub fn color_overrides(conn: &Connection) -> Result<ColorOverrides> {
    let mut stmt = conn.prepare("SELECT category, color FROM color_overrides")?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
    let mut out = ColorOverrides::new();
    for row in rows {
        let (cat, raw) = row?;
        match Color::parse(&raw) {
            Ok(c) => {
                out.insert(cat, c);
            }
            Err(e) => tracing::warn!(category = %cat, "ignoring stored colour: {}", e),
        }
    }
    Ok(out)
}

pub fn set_color_override(conn: &Connection, category: &str, color: &Color) -> Result<()> {
    conn.execute(
        "INSERT INTO color_overrides(category, color) VALUES (?1, ?2)
         ON CONFLICT(category) DO UPDATE SET color=excluded.color",
        params![category, color.as_str()],
    )?;
    Ok(())
}

pub fn clear_color_override(conn: &Connection, category: &str) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM color_overrides WHERE category=?1",
        params![category],
    )?;
    Ok(n > 0)
}
