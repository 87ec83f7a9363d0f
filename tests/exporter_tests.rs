// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{FakeBackend, USER, config, expense, period, setup_conn};
use dompet::commands::{Context, exporter};
use dompet::{cli, models::RecordId};
use tempfile::tempdir;

fn backend() -> FakeBackend {
    let mut noted = expense(2, "Transport", 12_500, "2025-05-04");
    noted.description = "taxi, late".into();
    FakeBackend::new().with_expenses(vec![
        expense(1, "Food", 50_000, "2025-05-02"),
        noted,
        expense(3, "Food", 9_000, "2025-06-01"),
    ])
}

#[test]
fn export_csv_through_cli() {
    let conn = setup_conn();
    let cfg = config();
    let backend = backend();
    let ctx = Context {
        conn: &conn,
        backend: &backend,
        config: &cfg,
    };

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("may.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "dompet",
        "export",
        "expenses",
        "--out",
        out_str.as_str(),
        "--month",
        "5",
        "--year",
        "2025",
    ]);
    if let Some(("export", m)) = matches.subcommand() {
        exporter::handle(&ctx, m).unwrap();
    } else {
        panic!("export subcommand not parsed");
    }

    let written = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "id,date,category,amount,description");
    assert_eq!(lines[1], "1,2025-05-02,Food,50000,Food #1");
    assert_eq!(lines[2], "2,2025-05-04,Transport,12500,\"taxi, late\"");
}

#[test]
fn export_json_keeps_only_the_period() {
    let conn = setup_conn();
    let cfg = config();
    let backend = backend();
    let ctx = Context {
        conn: &conn,
        backend: &backend,
        config: &cfg,
    };

    let dir = tempdir().unwrap();
    let out = dir.path().join("june.json");
    let n = exporter::export_expenses(&ctx, USER, period(6, 2025), "json", &out).unwrap();
    assert_eq!(n, 1);

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let items = v.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], serde_json::json!(RecordId::Num(3)));
    assert_eq!(items[0]["date"], "2025-06-01");
    assert_eq!(items[0]["amount"], 9_000);
}

#[test]
fn unknown_format_is_refused() {
    let conn = setup_conn();
    let cfg = config();
    let backend = backend();
    let ctx = Context {
        conn: &conn,
        backend: &backend,
        config: &cfg,
    };
    let dir = tempdir().unwrap();
    let out = dir.path().join("x.xml");
    let err = exporter::export_expenses(&ctx, USER, period(5, 2025), "xml", &out).unwrap_err();
    assert!(err.to_string().starts_with("Unknown format: xml"));
    assert!(!out.exists());
}
