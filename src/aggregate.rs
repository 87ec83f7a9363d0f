// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-category breakdown of expenses for the chart and its summary table.

use crate::models::{Color, Expense, Period};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_PALETTE: [&str; 5] = ["#4dc9f6", "#f67019", "#f53794", "#537bc4", "#acc236"];

/// Demo slices shown when a period has nothing to chart.
const PLACEHOLDER: [(&str, u64, i64, &str); 3] = [
    ("Food", 50_000, 500, "#4dc9f6"),
    ("Transport", 30_000, 300, "#f67019"),
    ("Entertainment", 20_000, 200, "#f53794"),
];

pub type ColorOverrides = HashMap<String, Color>;

/// Ordered default colours; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette(Vec<Color>);

impl Palette {
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self(colors))
        }
    }

    /// Colour for the `index`-th category, cycling through the palette.
    pub fn pick(&self, index: usize) -> &Color {
        &self.0[index % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(
            DEFAULT_PALETTE
                .iter()
                .filter_map(|c| Color::parse(c).ok())
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub amount: u64,
    pub percentage: Decimal,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownKind {
    /// Derived from real records.
    Actual,
    /// Fixed demo data for an empty period.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: u64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub kind: BreakdownKind,
    pub period: Option<Period>,
    pub categories: Vec<CategorySummary>,
}

impl Breakdown {
    pub fn placeholder(period: Option<Period>) -> Self {
        let categories = PLACEHOLDER
            .iter()
            .filter_map(|(name, amount, pct_tenths, color)| {
                Some(CategorySummary {
                    category: (*name).to_string(),
                    amount: *amount,
                    percentage: Decimal::new(*pct_tenths, 1),
                    color: Color::parse(color).ok()?,
                })
            })
            .collect();
        Self {
            kind: BreakdownKind::Placeholder,
            period,
            categories,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == BreakdownKind::Placeholder
    }

    pub fn total(&self) -> u64 {
        self.categories
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.amount))
    }

    pub fn chart_series(&self) -> Vec<ChartSlice> {
        self.categories
            .iter()
            .map(|c| ChartSlice {
                name: c.category.clone(),
                value: c.amount,
                color: c.color.clone(),
            })
            .collect()
    }
}

/// Groups `expenses` by category in first-seen order.
///
/// Only records inside `filter` count when it is set. When nothing is left
/// after filtering the placeholder breakdown is returned instead of an empty
/// one; check [`Breakdown::kind`] to tell the two apart.
pub fn aggregate(
    expenses: &[Expense],
    filter: Option<Period>,
    overrides: &ColorOverrides,
    palette: &Palette,
) -> Breakdown {
    let mut totals: Vec<(&str, u64)> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut grand_total = 0u64;
    let mut retained = 0usize;

    for e in expenses
        .iter()
        .filter(|e| filter.is_none_or(|p| p.contains(e.date)))
    {
        retained += 1;
        grand_total = grand_total.saturating_add(e.amount);
        match position.get(e.category.as_str()) {
            Some(&i) => totals[i].1 = totals[i].1.saturating_add(e.amount),
            None => {
                position.insert(e.category.as_str(), totals.len());
                totals.push((e.category.as_str(), e.amount));
            }
        }
    }

    if retained == 0 {
        return Breakdown::placeholder(filter);
    }

    let categories = totals
        .into_iter()
        .enumerate()
        .map(|(index, (name, amount))| CategorySummary {
            category: name.to_string(),
            amount,
            percentage: percentage(amount, grand_total),
            color: overrides
                .get(name)
                .unwrap_or_else(|| palette.pick(index))
                .clone(),
        })
        .collect();

    Breakdown {
        kind: BreakdownKind::Actual,
        period: filter,
        categories,
    }
}

/// `amount / total * 100` to one decimal place, 0.0 for a zero total.
pub fn percentage(amount: u64, total: u64) -> Decimal {
    let mut pct = if total == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(amount) * Decimal::ONE_HUNDRED / Decimal::from(total))
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    };
    pct.rescale(1);
    pct
}
