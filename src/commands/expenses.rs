// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Context, page_from, period_from};
use crate::commands::categories::known_names;
use crate::forms::{EntryForm, FormInput, FormOptions};
use crate::models::{Expense, Period, RecordId, Session};
use crate::utils::{format_rupiah, format_rupiah_decimal, maybe_print_json, pretty_table};
use crate::view::{HomeView, load_home};
use anyhow::{Context as _, Result, anyhow, bail};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("edit", sub)) => edit(ctx, sub)?,
        Some(("rm", sub)) => remove(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

/// Loads a period into a fresh view. A failed load leaves an error on the
/// view instead of returning one.
pub fn load_view(ctx: &Context, session: Session, period: Period, page: usize) -> HomeView {
    let mut view = HomeView::new(period);
    let ticket = view.begin_load();
    match load_home(ctx.backend, session, period) {
        Ok(data) => {
            view.apply(ticket, data);
        }
        Err(e) => {
            view.fail(ticket, format!("Could not load expenses: {}", e));
        }
    }
    view.go_to(page);
    view
}

fn loaded_view(ctx: &Context, session: Session, period: Period, page: usize) -> Result<HomeView> {
    let view = load_view(ctx, session, period, page);
    if let Some(err) = view.error() {
        bail!("{}", err);
    }
    Ok(view)
}

#[derive(Serialize)]
struct ListOutput<'a> {
    period: String,
    page: usize,
    total_pages: usize,
    total: u64,
    budget: Decimal,
    ratio: Decimal,
    warning: Option<String>,
    error: Option<&'a str>,
    expenses: &'a [Expense],
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let session = ctx.config.session()?;
    let view = load_view(ctx, session, period_from(sub)?, page_from(sub));
    let out = ListOutput {
        period: view.period().to_string(),
        page: view.page(),
        total_pages: view.total_pages(),
        total: view.total(),
        budget: view.budget(),
        ratio: view.ratio(),
        warning: view.warning().map(|w| w.message()),
        error: view.error(),
        expenses: view.current_page(),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &out)? {
        render(&view);
    }
    Ok(())
}

pub fn render(view: &HomeView) {
    if let Some(err) = view.error() {
        println!("{}", err);
    }
    if let Some(w) = view.warning() {
        println!("⚠️  {}", w.message());
    }
    println!(
        "{}  Expenses {}  Budget {}",
        view.period().label(),
        format_rupiah(view.total()),
        format_rupiah_decimal(view.budget())
    );
    let rows = view.current_page();
    if rows.is_empty() {
        println!("No expenses for {}", view.period().label());
        return;
    }
    let data = rows
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.category.clone(),
                e.date.format("%m/%d/%Y").to_string(),
                format!("-{}", format_rupiah(e.amount)),
                e.description.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Category", "Date", "Amount", "Description"], data)
    );
    println!("Page {} of {}", view.page(), view.total_pages());
}

/// `Some` only when the user narrowed the command to a month.
fn explicit_period(sub: &clap::ArgMatches) -> Result<Option<Period>> {
    if sub.get_one::<u32>("month").is_some() || sub.get_one::<i32>("year").is_some() {
        Ok(Some(period_from(sub)?))
    } else {
        Ok(None)
    }
}

fn input_from(sub: &clap::ArgMatches) -> FormInput {
    let text = |id: &str| sub.get_one::<String>(id).cloned();
    FormInput {
        category: text("category"),
        amount: text("amount"),
        description: text("description"),
        date: text("date"),
        month_year: None,
    }
}

fn add(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let session = ctx.config.session()?;
    let today = chrono::Local::now().date_naive();
    let view = record(ctx, session, &input_from(sub), explicit_period(sub)?, today)?;
    render(&view);
    Ok(())
}

/// Creates an expense and shows it on top of its month without reloading.
pub fn record(
    ctx: &Context,
    session: Session,
    input: &FormInput,
    range: Option<Period>,
    today: NaiveDate,
) -> Result<HomeView> {
    let options = FormOptions::expense(range, today).with_categories(known_names(ctx, session));
    let draft = EntryForm::new(options).validate(input)?;
    let new = draft
        .into_new_expense(session)
        .ok_or_else(|| anyhow!("Expense form is incomplete"))?;

    let mut view = loaded_view(ctx, session, range.unwrap_or(Period::of(new.date)), 1)?;
    let created = ctx
        .backend
        .create_expense(&new)
        .context("Could not save expense")?;
    println!(
        "Recorded {} on {} in {}",
        format_rupiah(created.amount),
        created.date,
        created.category
    );
    view.add_local(created);
    Ok(view)
}

fn edit(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let session = ctx.config.session()?;
    let id: RecordId = sub.get_one::<String>("id").unwrap().parse()?;
    let today = chrono::Local::now().date_naive();
    let view = amend(ctx, session, &id, &input_from(sub), period_from(sub)?, today)?;
    render(&view);
    Ok(())
}

/// Updates an expense of `period`; fields left blank keep their value.
pub fn amend(
    ctx: &Context,
    session: Session,
    id: &RecordId,
    input: &FormInput,
    period: Period,
    today: NaiveDate,
) -> Result<HomeView> {
    let mut view = loaded_view(ctx, session, period, 1)?;
    let current = view
        .find(id)
        .cloned()
        .ok_or_else(|| anyhow!("Expense {} not found in {}", id, period.label()))?;

    let merged = FormInput {
        category: input.category.clone().or(Some(current.category)),
        amount: input.amount.clone().or(Some(current.amount.to_string())),
        description: input.description.clone().or(Some(current.description)),
        date: input.date.clone().or(Some(current.date.to_string())),
        month_year: None,
    };
    let options = FormOptions::expense(None, today).with_categories(known_names(ctx, session));
    let draft = EntryForm::new(options).validate(&merged)?;
    let new = draft
        .into_new_expense(session)
        .ok_or_else(|| anyhow!("Expense form is incomplete"))?;

    let updated = ctx
        .backend
        .update_expense(id, &new)
        .context("Could not update expense")?;
    println!("Updated expense {}", id);
    if !view.replace_local(updated) {
        tracing::warn!(%id, "edited expense vanished from the view");
    }
    Ok(view)
}

fn remove(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let session = ctx.config.session()?;
    let id: RecordId = sub.get_one::<String>("id").unwrap().parse()?;
    let view = discard(ctx, session, &id, period_from(sub)?, page_from(sub))?;
    render(&view);
    Ok(())
}

/// Deletes an expense shown on `page` of `period` and returns the view as
/// it looks afterwards.
pub fn discard(
    ctx: &Context,
    session: Session,
    id: &RecordId,
    period: Period,
    page: usize,
) -> Result<HomeView> {
    let mut view = loaded_view(ctx, session, period, page)?;
    let target = view
        .find(id)
        .cloned()
        .ok_or_else(|| anyhow!("Expense {} not found in {}", id, period.label()))?;
    ctx.backend
        .delete_expense(id)
        .context("Could not delete expense")?;
    println!(
        "Deleted expense in \"{}\" ({})",
        target.category,
        format_rupiah(target.amount)
    );
    view.remove_local(id);
    Ok(view)
}
