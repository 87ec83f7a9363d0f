// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Context, period_from};
use crate::aggregate::{Breakdown, ChartSlice, Palette, aggregate};
use crate::db;
use crate::models::{Color, Period, Session};
use crate::utils::{format_rupiah, maybe_print_json, swatch};
use anyhow::{Context as _, Result};
use comfy_table::{Cell, Table, presets::UTF8_FULL};

const BAR_WIDTH: usize = 50;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(ctx, sub)?,
        Some(("color", sub)) => color(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

/// Breakdown of `period` using the stored colour overrides.
pub fn breakdown(ctx: &Context, session: Session, period: Period) -> Result<Breakdown> {
    let expenses = ctx
        .backend
        .fetch_period(session, period)
        .context("Could not load expenses")?;
    let overrides = db::color_overrides(ctx.conn)?;
    Ok(aggregate(
        &expenses,
        Some(period),
        &overrides,
        &Palette::default(),
    ))
}

/// Breakdown over every month of `year`, unfiltered once fetched.
pub fn breakdown_year(ctx: &Context, session: Session, year: i32) -> Result<Breakdown> {
    let mut expenses = Vec::new();
    for month in 1..=12 {
        let period = Period::new(month, year)?;
        expenses.extend(
            ctx.backend
                .fetch_period(session, period)
                .with_context(|| format!("Could not load expenses of {}", period.label()))?,
        );
    }
    let overrides = db::color_overrides(ctx.conn)?;
    Ok(aggregate(&expenses, None, &overrides, &Palette::default()))
}

fn show(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let session = ctx.config.session()?;
    let period = period_from(sub)?;
    let (bd, label) = if sub.get_flag("all") {
        (
            breakdown_year(ctx, session, period.year())?,
            period.year().to_string(),
        )
    } else {
        (breakdown(ctx, session, period)?, period.label())
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &bd)? {
        return Ok(());
    }

    println!("Total Expenses {}", format_rupiah(bd.total()));
    if bd.is_placeholder() {
        println!("No expenses for {}; showing sample data", label);
    }
    println!("{}", bar(&bd.chart_series(), BAR_WIDTH));

    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(["Category", "%", "Amount", "Color"].map(Cell::new));
    for c in &bd.categories {
        t.add_row(vec![
            Cell::new(&c.category),
            Cell::new(format!("{:.1}%", c.percentage)),
            Cell::new(format!("-{}", format_rupiah(c.amount))),
            swatch(&c.color, 2).add_attribute(comfy_table::Attribute::Bold),
        ]);
    }
    println!("{}", t);
    Ok(())
}

/// Proportional stacked bar, one coloured run per slice. Every non-zero
/// slice gets at least one cell.
pub fn bar(series: &[ChartSlice], width: usize) -> String {
    let total: u64 = series.iter().map(|s| s.value).sum();
    if total == 0 || width == 0 {
        return String::new();
    }
    let mut out = String::new();
    for s in series.iter().filter(|s| s.value > 0) {
        let cells = ((s.value as u128 * width as u128) / total as u128).max(1) as usize;
        let (r, g, b) = s.color.rgb();
        out.push_str(&format!(
            "\x1b[38;2;{};{};{}m{}\x1b[0m",
            r,
            g,
            b,
            "█".repeat(cells)
        ));
    }
    out
}

fn color(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap().trim();
    if sub.get_flag("reset") {
        if db::clear_color_override(ctx.conn, category)? {
            println!("Colour of '{}' reset to the palette", category);
        } else {
            println!("'{}' had no custom colour", category);
        }
        return Ok(());
    }
    let color = Color::parse(sub.get_one::<String>("color").unwrap())?;
    db::set_color_override(ctx.conn, category, &color)?;
    println!("Colour of '{}' set to {}", category, color);
    Ok(())
}
