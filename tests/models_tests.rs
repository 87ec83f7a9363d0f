// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{date, period};
use dompet::errors::PeriodError;
use dompet::models::{Budget, Color, Expense, NewExpense, Period, RecordId};
use rust_decimal::Decimal;

#[test]
fn record_ids_accept_numbers_and_strings() {
    assert_eq!("17".parse::<RecordId>().unwrap(), RecordId::Num(17));
    assert_eq!(
        "64b7f0a2".parse::<RecordId>().unwrap(),
        RecordId::Text("64b7f0a2".into())
    );
    assert_eq!(RecordId::Num(5).to_string(), "5");
}

#[test]
fn expense_reads_wire_shapes() {
    let raw = r#"{
        "id": "abc",
        "categoryName": "Food",
        "amount": 25000,
        "date": "2025-05-03T00:00:00.000Z"
    }"#;
    let e: Expense = serde_json::from_str(raw).unwrap();
    assert_eq!(e.id, RecordId::Text("abc".into()));
    assert_eq!(e.category, "Food");
    assert_eq!(e.description, "");
    assert_eq!(e.date, date("2025-05-03"));

    let plain = r#"{"id": 4, "category": "Health", "amount": 1, "description": "x", "date": "2025-01-31"}"#;
    let e: Expense = serde_json::from_str(plain).unwrap();
    assert_eq!(e.id, RecordId::Num(4));
    assert_eq!(e.date, date("2025-01-31"));

    let bad = r#"{"id": 4, "category": "Health", "amount": 1, "date": "31/01/2025"}"#;
    assert!(serde_json::from_str::<Expense>(bad).is_err());
}

#[test]
fn budget_amount_may_be_a_string() {
    let b: Budget =
        serde_json::from_str(r#"{"id": 1, "month": 5, "year": 2025, "amount": "1500000.00"}"#)
            .unwrap();
    assert_eq!(b.amount, Decimal::from(1_500_000));
    assert_eq!(b.period().unwrap(), period(5, 2025));

    let b: Budget =
        serde_json::from_str(r#"{"id": 2, "month": 13, "year": 2025, "amount": 10}"#).unwrap();
    assert_eq!(b.period(), Err(PeriodError::Month(13)));
}

#[test]
fn new_expense_sends_user_id() {
    let new = NewExpense {
        user_id: 9,
        category: "Food".into(),
        amount: 100,
        description: "tea".into(),
        date: date("2025-05-01"),
    };
    let v = serde_json::to_value(&new).unwrap();
    assert_eq!(v["userID"], 9);
    assert_eq!(v["date"], "2025-05-01");
    let e = new.into_expense(RecordId::Num(3));
    assert_eq!(e.amount, 100);
}

#[test]
fn colours_are_validated() {
    let c = Color::parse(" #4DC9F6 ").unwrap();
    assert_eq!(c.as_str(), "#4dc9f6");
    assert_eq!(c.rgb(), (0x4d, 0xc9, 0xf6));
    assert!(Color::parse("4dc9f6").is_err());
    assert!(Color::parse("#4dc9f").is_err());
    assert!(serde_json::from_str::<Color>(r##""#zzzzzz""##).is_err());
}

#[test]
fn periods() {
    let p = period(5, 2025);
    assert_eq!(p.to_string(), "05/2025");
    assert_eq!(p.label(), "May 2025");
    assert_eq!(p.first_day(), date("2025-05-01"));
    assert!(p.contains(date("2025-05-31")));
    assert!(!p.contains(date("2024-05-31")));
    assert_eq!(Period::of(date("2025-12-09")), period(12, 2025));
    assert_eq!(Period::new(0, 2025), Err(PeriodError::Month(0)));
    assert_eq!(Period::new(1, 1999), Err(PeriodError::Year(1999)));
}

#[test]
fn numeric_text_ids_match_typed_ids() {
    let wire: RecordId = serde_json::from_str(r#""5""#).unwrap();
    let typed: RecordId = "5".parse().unwrap();
    assert!(matches!(wire, RecordId::Text(_)));
    assert!(matches!(typed, RecordId::Num(5)));
    assert_eq!(wire, typed);
    assert_ne!(RecordId::Text("05".into()), RecordId::Num(5));
    assert_ne!(RecordId::Text("abc".into()), RecordId::Num(5));

    let seen: std::collections::HashSet<RecordId> = [wire].into_iter().collect();
    assert!(seen.contains(&typed));
}
