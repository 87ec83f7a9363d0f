// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! State behind the expense list: what was loaded for which period, which
//! page is shown, and the local edits applied on top.

use crate::api::Backend;
use crate::budget::{BudgetWarning, budget_ratio};
use crate::errors::ApiError;
use crate::models::{Expense, Period, RecordId, Session};
use crate::paginate::{PAGE_SIZE, clamp_page, page_after_removal, paginate, total_pages};
use rust_decimal::Decimal;
use std::thread;

/// Identifies one load. Only the most recent ticket for the view's current
/// period may write results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    period: Period,
}

impl Ticket {
    pub fn period(&self) -> Period {
        self.period
    }
}

/// Everything the expense list needs for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeData {
    pub expenses: Vec<Expense>,
    pub total: u64,
    pub budget: Decimal,
    pub ratio: Decimal,
}

/// Issues the four period reads in parallel and merges them once all are in.
///
/// A failed ratio read falls back to the locally computed ratio; any other
/// failure fails the load.
pub fn load_home(
    backend: &dyn Backend,
    session: Session,
    period: Period,
) -> Result<HomeData, ApiError> {
    let (expenses, total, budgets, ratio) = thread::scope(|s| {
        let expenses = s.spawn(|| backend.fetch_period(session, period));
        let total = s.spawn(|| backend.sum_expenses(session, period));
        let budgets = s.spawn(|| backend.list_budgets(session, period));
        let ratio = s.spawn(|| backend.budget_ratio(session, period));
        (
            join(expenses),
            join(total),
            join(budgets),
            join(ratio),
        )
    });

    let expenses = expenses?;
    let total = total?;
    let budget = budgets?
        .first()
        .map(|b| b.amount)
        .unwrap_or(Decimal::ZERO);
    let ratio = match ratio {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(%period, "budget ratio unavailable, computing locally: {}", e);
            budget_ratio(total, budget).unwrap_or(Decimal::ZERO)
        }
    };

    Ok(HomeData {
        expenses,
        total,
        budget,
        ratio,
    })
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(v) => v,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

#[derive(Debug, Clone)]
pub struct HomeView {
    period: Period,
    page: usize,
    generation: u64,
    expenses: Vec<Expense>,
    total: u64,
    budget: Decimal,
    ratio: Decimal,
    error: Option<String>,
}

impl HomeView {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            page: 1,
            generation: 0,
            expenses: Vec::new(),
            total: 0,
            budget: Decimal::ZERO,
            ratio: Decimal::ZERO,
            error: None,
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Switching the filter restarts at page one; loads issued for the old
    /// period become stale.
    pub fn set_period(&mut self, period: Period) {
        if period != self.period {
            self.period = period;
            self.page = 1;
            self.generation += 1;
        }
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.generation += 1;
        Ticket {
            generation: self.generation,
            period: self.period,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation && ticket.period == self.period
    }

    /// Stores `data` unless a newer load has been issued since `ticket`.
    pub fn apply(&mut self, ticket: Ticket, data: HomeData) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(period = %ticket.period, "dropping stale load");
            return false;
        }
        self.expenses = data
            .expenses
            .into_iter()
            .filter(|e| self.period.contains(e.date))
            .collect();
        self.total = data.total;
        self.budget = data.budget;
        self.ratio = data.ratio;
        self.error = None;
        self.page = clamp_page(self.page, self.total_pages());
        true
    }

    /// Records a failed load; data already shown is kept.
    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.error = Some(message.into());
        true
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn find(&self, id: &RecordId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn budget(&self) -> Decimal {
        self.budget
    }

    pub fn ratio(&self) -> Decimal {
        self.ratio
    }

    pub fn warning(&self) -> Option<BudgetWarning> {
        BudgetWarning::from_ratio(self.ratio)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.expenses.len(), PAGE_SIZE)
    }

    pub fn go_to(&mut self, page: usize) {
        self.page = clamp_page(page, self.total_pages());
    }

    pub fn next(&mut self) {
        self.go_to(self.page + 1);
    }

    pub fn prev(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    pub fn current_page(&self) -> &[Expense] {
        paginate(&self.expenses, PAGE_SIZE, self.page)
    }

    /// Puts a freshly created expense at the top. Returns false when it
    /// lies outside the shown period and so is not listed.
    pub fn add_local(&mut self, expense: Expense) -> bool {
        if !self.period.contains(expense.date) {
            return false;
        }
        self.total = self.total.saturating_add(expense.amount);
        self.expenses.insert(0, expense);
        self.page = 1;
        true
    }

    /// Swaps in an edited expense, dropping it from the list when its new
    /// date moved it out of the period.
    pub fn replace_local(&mut self, expense: Expense) -> bool {
        let Some(pos) = self.expenses.iter().position(|e| e.id == expense.id) else {
            return false;
        };
        let old = self.expenses[pos].amount;
        self.total = self.total.saturating_sub(old);
        if self.period.contains(expense.date) {
            self.total = self.total.saturating_add(expense.amount);
            self.expenses[pos] = expense;
        } else {
            self.expenses.remove(pos);
            self.page = clamp_page(self.page, self.total_pages());
        }
        true
    }

    /// Removes one expense; steps back a page when the shown page empties.
    pub fn remove_local(&mut self, id: &RecordId) -> bool {
        let Some(pos) = self.expenses.iter().position(|e| &e.id == id) else {
            return false;
        };
        let removed = self.expenses.remove(pos);
        self.total = self.total.saturating_sub(removed.amount);
        let remaining = self.current_page().len();
        self.page = page_after_removal(self.page, remaining);
        true
    }

    /// Client-side cascade of a category deletion, matching names without
    /// regard to case. Returns how many rows were dropped.
    pub fn remove_category_local(&mut self, category: &str) -> usize {
        let before = self.expenses.len();
        let mut dropped = 0u64;
        self.expenses.retain(|e| {
            if e.category.eq_ignore_ascii_case(category) {
                dropped = dropped.saturating_add(e.amount);
                false
            } else {
                true
            }
        });
        self.total = self.total.saturating_sub(dropped);
        self.page = clamp_page(self.page, self.total_pages());
        before - self.expenses.len()
    }
}
