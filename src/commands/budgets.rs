// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Context, page_from, period_from};
use crate::budget::{BudgetWarning, budget_ratio};
use crate::forms::{EntryForm, FormInput, FormOptions};
use crate::models::{Budget, Period, RecordId, Session};
use crate::paginate::{PAGE_SIZE, clamp_page, paginate, total_pages};
use crate::utils::{format_rupiah, format_rupiah_decimal, maybe_print_json, pretty_table};
use anyhow::{Context as _, Result, anyhow};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("rm", sub)) => {
            let id: RecordId = sub.get_one::<String>("id").unwrap().parse()?;
            ctx.backend
                .delete_budget(&id)
                .context("Could not delete budget")?;
            println!("Removed budget {}", id);
        }
        Some(("status", sub)) => status(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let session = ctx.config.session()?;
    let input = FormInput {
        month_year: sub.get_one::<String>("month_year").cloned(),
        amount: sub.get_one::<String>("amount").cloned(),
        ..FormInput::default()
    };
    let saved = upsert(ctx, session, &input)?;
    println!(
        "Budget set for {:02}/{} = {}",
        saved.month,
        saved.year,
        format_rupiah_decimal(saved.amount)
    );
    Ok(())
}

/// Creates the month's budget, or replaces it when one exists.
pub fn upsert(ctx: &Context, session: Session, input: &FormInput) -> Result<Budget> {
    let draft = EntryForm::new(FormOptions::budget()).validate(input)?;
    let new = draft
        .into_new_budget(session)
        .ok_or_else(|| anyhow!("Budget form is incomplete"))?;
    let period = Period::new(new.month, new.year)?;

    let existing = ctx
        .backend
        .list_budgets(session, period)
        .context("Could not load budgets")?;
    let saved = match existing.first() {
        Some(b) => ctx.backend.update_budget(&b.id, &new),
        None => ctx.backend.create_budget(&new),
    }
    .context("Could not save budget")?;
    Ok(saved)
}

#[derive(Serialize)]
struct BudgetPage<'a> {
    page: usize,
    total_pages: usize,
    budgets: &'a [Budget],
}

/// Newest month first.
pub fn sorted_budgets(mut budgets: Vec<Budget>) -> Vec<Budget> {
    budgets.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
    budgets
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let session = ctx.config.session()?;
    let budgets = sorted_budgets(
        ctx.backend
            .list_all_budgets(session)
            .context("Could not load budgets")?,
    );
    let pages = total_pages(budgets.len(), PAGE_SIZE);
    let page = clamp_page(page_from(sub), pages);
    let shown = paginate(&budgets, PAGE_SIZE, page);

    let out = BudgetPage {
        page,
        total_pages: pages,
        budgets: shown,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &out)? {
        return Ok(());
    }
    if shown.is_empty() {
        println!("No budgets to show");
        return Ok(());
    }
    let rows = shown
        .iter()
        .map(|b| {
            vec![
                b.id.to_string(),
                format!("{:02}/{}", b.month, b.year),
                format_rupiah_decimal(b.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Month/Year", "Budget Amount"], rows)
    );
    println!("Page {} of {}", page, pages);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Status {
    pub period: String,
    pub spent: u64,
    pub budget: Decimal,
    pub ratio: Option<Decimal>,
    pub warning: Option<String>,
}

/// Spending against the month's budget. The service's ratio is preferred;
/// it is computed locally when that call fails.
pub fn status_for(ctx: &Context, session: Session, period: Period) -> Result<Status> {
    let spent = ctx
        .backend
        .sum_expenses(session, period)
        .context("Could not load expense total")?;
    let budget = ctx
        .backend
        .list_budgets(session, period)
        .context("Could not load budget")?
        .first()
        .map(|b| b.amount)
        .unwrap_or(Decimal::ZERO);
    let ratio = match ctx.backend.budget_ratio(session, period) {
        Ok(r) => Some(r),
        Err(e) => {
            tracing::warn!(%period, "budget ratio unavailable, computing locally: {}", e);
            budget_ratio(spent, budget)
        }
    };
    Ok(Status {
        period: period.to_string(),
        spent,
        budget,
        ratio,
        warning: ratio
            .and_then(BudgetWarning::from_ratio)
            .map(|w| w.message()),
    })
}

fn status(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let session = ctx.config.session()?;
    let period = period_from(sub)?;
    let st = status_for(ctx, session, period)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &st)? {
        return Ok(());
    }
    if let Some(w) = &st.warning {
        println!("⚠️  {}", w);
    }
    let used = st
        .ratio
        .map(|r| format!("{}%", (r * Decimal::ONE_HUNDRED).round_dp(1).normalize()))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{}",
        pretty_table(
            &["Month", "Spent", "Budget", "Used"],
            vec![vec![
                period.label(),
                format_rupiah(st.spent),
                format_rupiah_decimal(st.budget),
                used,
            ]],
        )
    );
    Ok(())
}
