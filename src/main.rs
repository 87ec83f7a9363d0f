// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context as _, Result};

use dompet::api::HttpBackend;
use dompet::commands::{self, Context};
use dompet::config::Config;
use dompet::{cli, db, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    utils::init_tracing(matches.get_count("verbose"));

    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("session", sub)) => return commands::session::handle(&conn, sub),
        Some(("config", sub)) => return commands::config::handle(&conn, sub),
        _ => {}
    }

    let config = Config::load(&conn)?;
    let backend = HttpBackend::new(config.endpoints.clone(), config.timeout_secs)
        .context("Could not build HTTP client")?;
    let ctx = Context {
        conn: &conn,
        backend: &backend,
        config: &config,
    };

    match matches.subcommand() {
        Some(("expense", sub)) => commands::expenses::handle(&ctx, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&ctx, sub)?,
        Some(("category", sub)) => commands::categories::handle(&ctx, sub)?,
        Some(("chart", sub)) => commands::chart::handle(&ctx, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ctx, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
