// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dompet::api::{ratio_or_zero, sum_units};
use dompet::config::Endpoints;
use dompet::errors::Service;
use rust_decimal::Decimal;

fn body(raw: &str) -> Option<Decimal> {
    serde_json::from_str(raw).unwrap()
}

#[test]
fn sum_body_shapes() {
    assert_eq!(sum_units(body("null")), 0);
    assert_eq!(sum_units(body("123")), 123);
    assert_eq!(sum_units(body(r#""123""#)), 123);
    assert_eq!(sum_units(body(r#""1500000.75""#)), 1_500_000);
    assert_eq!(sum_units(body("-5")), 0);
    assert!(serde_json::from_str::<Option<Decimal>>(r#""lots""#).is_err());
}

#[test]
fn ratio_body_shapes() {
    assert_eq!(ratio_or_zero(body("null")), Decimal::ZERO);
    assert_eq!(ratio_or_zero(body("0.5")), Decimal::new(5, 1));
    assert_eq!(ratio_or_zero(body(r#""1.2""#)), Decimal::new(12, 1));
}

#[test]
fn routes_join_onto_service_bases() {
    let ep = Endpoints::default();
    assert_eq!(
        ep.url(Service::Expense, &format!("api/expense/mny/{}", 3)),
        "http://localhost:3003/api/expense/mny/3"
    );
    assert_eq!(
        ep.url(Service::Expense, "api/expense/mny/sum"),
        "http://localhost:3003/api/expense/mny/sum"
    );
    assert_eq!(
        ep.url(Service::Budget, "api/budget/check"),
        "http://localhost:3001/api/budget/check"
    );
    assert_eq!(
        ep.url(Service::Budget, "api/budget/user"),
        "http://localhost:3001/api/budget/user"
    );
    assert_eq!(
        ep.url(Service::Category, &format!("api/category/{}", "64b7")),
        "http://localhost:3002/api/category/64b7"
    );

    let trailing = Endpoints {
        budget: "https://budget.example/v1/".into(),
        ..Endpoints::default()
    };
    assert_eq!(
        trailing.url(Service::Budget, "/api/budget/mny"),
        "https://budget.example/v1/api/budget/mny"
    );
}
