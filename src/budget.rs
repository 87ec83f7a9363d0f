// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

/// Spending share of the budget at which the warning banner appears.
pub fn warning_threshold() -> Decimal {
    Decimal::new(8, 1)
}

/// Expenses total over budget amount; `None` without a budget.
pub fn budget_ratio(total: u64, budget: Decimal) -> Option<Decimal> {
    if budget <= Decimal::ZERO {
        return None;
    }
    Decimal::from(total).checked_div(budget)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetWarning {
    ratio: Decimal,
}

impl BudgetWarning {
    pub fn from_ratio(ratio: Decimal) -> Option<Self> {
        if ratio >= warning_threshold() {
            Some(Self { ratio })
        } else {
            None
        }
    }

    pub fn ratio(&self) -> Decimal {
        self.ratio
    }

    pub fn percent_spent(&self) -> Decimal {
        (self.ratio * Decimal::ONE_HUNDRED).round_dp(1).normalize()
    }

    pub fn message(&self) -> String {
        format!(
            "Warning: You've spent {}% of your budget!",
            self.percent_spent()
        )
    }
}
