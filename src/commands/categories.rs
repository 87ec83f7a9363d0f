// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Context, period_from};
use crate::commands::expenses::{load_view, render};
use crate::db;
use crate::models::{DEFAULT_CATEGORIES, Period, RecordId, Session};
use crate::utils::{maybe_print_json, pretty_table};
use crate::view::HomeView;
use anyhow::{Context as _, Result, anyhow, bail};
use serde::Serialize;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let session = ctx.config.session()?;
            let data = listing(ctx, session);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|c| {
                        vec![
                            c.id.map(|i| i.to_string()).unwrap_or_default(),
                            c.name,
                            c.source.to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Category", "Source"], rows));
            }
        }
        Some(("add", sub)) => {
            let session = ctx.config.session()?;
            let name = sub.get_one::<String>("name").unwrap();
            add(ctx, session, name)?;
            println!("Added category '{}'", name.trim());
        }
        Some(("rm", sub)) => {
            let session = ctx.config.session()?;
            let id: RecordId = sub.get_one::<String>("id").unwrap().parse()?;
            remove(ctx, session, &id, sub)?;
        }
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Default,
    Service,
    Local,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Source::Default => "default",
            Source::Service => "service",
            Source::Local => "local",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub id: Option<RecordId>,
    pub name: String,
    pub source: Source,
}

/// Defaults, then the service's categories, then names cached locally.
/// Names are unique ignoring case; the first occurrence wins. An
/// unreachable service or store only drops its share of the list.
pub fn listing(ctx: &Context, session: Session) -> Vec<CategoryRow> {
    let mut out: Vec<CategoryRow> = Vec::new();
    let mut push = |row: CategoryRow| {
        if !out.iter().any(|r| r.name.eq_ignore_ascii_case(&row.name)) {
            out.push(row);
        }
    };

    for name in DEFAULT_CATEGORIES {
        push(CategoryRow {
            id: None,
            name: name.to_string(),
            source: Source::Default,
        });
    }
    match ctx.backend.list_categories(session) {
        Ok(cats) => {
            for c in cats {
                push(CategoryRow {
                    id: Some(c.id),
                    name: c.name,
                    source: Source::Service,
                });
            }
        }
        Err(e) => tracing::warn!("category service unavailable: {}", e),
    }
    match db::custom_categories(ctx.conn) {
        Ok(names) => {
            for name in names {
                push(CategoryRow {
                    id: None,
                    name,
                    source: Source::Local,
                });
            }
        }
        Err(e) => tracing::warn!("cached categories unreadable: {}", e),
    }
    out
}

pub fn known_names(ctx: &Context, session: Session) -> Vec<String> {
    listing(ctx, session).into_iter().map(|c| c.name).collect()
}

pub fn add(ctx: &Context, session: Session, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Category name is required");
    }
    if listing(ctx, session)
        .iter()
        .any(|c| c.name.eq_ignore_ascii_case(name))
    {
        bail!("Category '{}' already exists", name);
    }
    ctx.backend
        .create_category(session, name)
        .context("Could not create category")?;
    db::remember_category(ctx.conn, name)?;
    Ok(())
}

fn remove(ctx: &Context, session: Session, id: &RecordId, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_from(sub)?;
    let done = cascade(ctx, session, id, period)?;
    println!(
        "Removed category '{}' and hid {} of its expenses in {}",
        done.name,
        done.hidden,
        period.label()
    );
    render(&done.view);
    Ok(())
}

#[derive(Debug)]
pub struct Removal {
    pub name: String,
    pub view: HomeView,
    pub hidden: usize,
}

/// Deletes a category on the service, forgets it locally and drops its
/// expenses from `period`'s view. The two sides are not atomic.
pub fn cascade(ctx: &Context, session: Session, id: &RecordId, period: Period) -> Result<Removal> {
    let cats = ctx
        .backend
        .list_categories(session)
        .context("Could not load categories")?;
    let name = cats
        .into_iter()
        .find(|c| &c.id == id)
        .map(|c| c.name)
        .ok_or_else(|| anyhow!("Category {} not found", id))?;

    ctx.backend
        .delete_category(id)
        .context("Could not delete category")?;
    db::forget_category(ctx.conn, &name)?;
    db::clear_color_override(ctx.conn, &name)?;

    let mut view = load_view(ctx, session, period, 1);
    let hidden = view.remove_category_local(&name);
    Ok(Removal { name, view, hidden })
}
