// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Context, period_from};
use crate::models::{Expense, Period, Session};
use anyhow::{Context as _, Result, bail};
use serde_json::json;
use std::path::Path;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => {
            let session = ctx.config.session()?;
            let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
            let out = sub.get_one::<String>("out").unwrap();
            let period = period_from(sub)?;
            let n = export_expenses(ctx, session, period, &fmt, Path::new(out))?;
            println!("Exported {} expenses of {} to {}", n, period.label(), out);
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn export_expenses(
    ctx: &Context,
    session: Session,
    period: Period,
    fmt: &str,
    out: &Path,
) -> Result<usize> {
    let expenses = ctx
        .backend
        .fetch_period(session, period)
        .context("Could not load expenses")?;
    let rows: Vec<&Expense> = expenses.iter().filter(|e| period.contains(e.date)).collect();

    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Cannot write {}", out.display()))?;
            wtr.write_record(["id", "date", "category", "amount", "description"])?;
            for e in &rows {
                wtr.write_record([
                    e.id.to_string(),
                    e.date.to_string(),
                    e.category.clone(),
                    e.amount.to_string(),
                    e.description.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|e| {
                    json!({
                        "id": e.id, "date": e.date, "category": e.category,
                        "amount": e.amount, "description": e.description
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Cannot write {}", out.display()))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(rows.len())
}
