// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::NaiveDate;
use dompet::api::Backend;
use dompet::config::Config;
use dompet::errors::{ApiError, Service};
use dompet::models::{
    Budget, Category, Expense, NewBudget, NewExpense, Period, RecordId, Session,
};
use reqwest::StatusCode;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::sync::Mutex;

pub const USER: Session = Session { user_id: 1 };

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn period(month: u32, year: i32) -> Period {
    Period::new(month, year).unwrap()
}

pub fn expense(id: i64, category: &str, amount: u64, on: &str) -> Expense {
    Expense {
        id: RecordId::Num(id),
        category: category.to_string(),
        amount,
        description: format!("{} #{}", category, id),
        date: date(on),
    }
}

pub fn setup_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    dompet::db::init_schema(&conn).unwrap();
    conn
}

pub fn config() -> Config {
    Config {
        user_id: Some(USER.user_id),
        ..Config::default()
    }
}

/// In-memory stand-in for the three services. Server pages hold
/// `page_size` rows.
pub struct FakeBackend {
    pub expenses: Mutex<Vec<Expense>>,
    pub budgets: Mutex<Vec<Budget>>,
    pub categories: Mutex<Vec<Category>>,
    pub ratio: Mutex<Option<Decimal>>,
    pub down: Mutex<Vec<Service>>,
    pub next_id: Mutex<i64>,
    pub page_size: usize,
    /// Answer every page request with the whole period.
    pub ignore_page: bool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            expenses: Mutex::new(Vec::new()),
            budgets: Mutex::new(Vec::new()),
            categories: Mutex::new(Vec::new()),
            ratio: Mutex::new(Some(Decimal::ZERO)),
            down: Mutex::new(Vec::new()),
            next_id: Mutex::new(1000),
            page_size: 4,
            ignore_page: false,
        }
    }

    pub fn ignoring_page(mut self) -> Self {
        self.ignore_page = true;
        self
    }

    pub fn with_expenses(self, rows: Vec<Expense>) -> Self {
        *self.expenses.lock().unwrap() = rows;
        self
    }

    pub fn with_budget(self, id: i64, month: u32, year: i32, amount: i64) -> Self {
        self.budgets.lock().unwrap().push(Budget {
            id: RecordId::Num(id),
            month,
            year,
            amount: Decimal::from(amount),
        });
        self
    }

    pub fn with_category(self, id: i64, name: &str) -> Self {
        self.categories.lock().unwrap().push(Category {
            id: RecordId::Num(id),
            name: name.to_string(),
        });
        self
    }

    /// `None` makes the ratio endpoint fail.
    pub fn with_ratio(self, ratio: Option<Decimal>) -> Self {
        *self.ratio.lock().unwrap() = ratio;
        self
    }

    pub fn take_down(&self, service: Service) {
        self.down.lock().unwrap().push(service);
    }

    fn check(&self, service: Service) -> Result<(), ApiError> {
        if self.down.lock().unwrap().contains(&service) {
            return Err(ApiError::Status {
                service,
                status: StatusCode::SERVICE_UNAVAILABLE,
            });
        }
        Ok(())
    }

    fn next_id(&self) -> RecordId {
        let mut n = self.next_id.lock().unwrap();
        *n += 1;
        RecordId::Num(*n)
    }

    fn in_period(&self, period: Period) -> Vec<Expense> {
        self.expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| period.contains(e.date))
            .cloned()
            .collect()
    }

    fn not_found(service: Service) -> ApiError {
        ApiError::Status {
            service,
            status: StatusCode::NOT_FOUND,
        }
    }
}

impl Backend for FakeBackend {
    fn list_expenses(
        &self,
        _session: Session,
        period: Period,
        page: usize,
    ) -> Result<Vec<Expense>, ApiError> {
        self.check(Service::Expense)?;
        let rows = self.in_period(period);
        if self.ignore_page {
            return Ok(rows);
        }
        Ok(rows
            .chunks(self.page_size)
            .nth(page - 1)
            .map(|c| c.to_vec())
            .unwrap_or_default())
    }

    fn sum_expenses(&self, _session: Session, period: Period) -> Result<u64, ApiError> {
        self.check(Service::Expense)?;
        Ok(self.in_period(period).iter().map(|e| e.amount).sum())
    }

    fn create_expense(&self, expense: &NewExpense) -> Result<Expense, ApiError> {
        self.check(Service::Expense)?;
        let created = expense.clone().into_expense(self.next_id());
        self.expenses.lock().unwrap().push(created.clone());
        Ok(created)
    }

    fn update_expense(&self, id: &RecordId, expense: &NewExpense) -> Result<Expense, ApiError> {
        self.check(Service::Expense)?;
        let mut rows = self.expenses.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| Self::not_found(Service::Expense))?;
        *slot = expense.clone().into_expense(id.clone());
        Ok(slot.clone())
    }

    fn delete_expense(&self, id: &RecordId) -> Result<(), ApiError> {
        self.check(Service::Expense)?;
        let mut rows = self.expenses.lock().unwrap();
        let before = rows.len();
        rows.retain(|e| &e.id != id);
        if rows.len() == before {
            return Err(Self::not_found(Service::Expense));
        }
        Ok(())
    }

    fn list_budgets(&self, _session: Session, period: Period) -> Result<Vec<Budget>, ApiError> {
        self.check(Service::Budget)?;
        Ok(self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.month == period.month() && b.year == period.year())
            .cloned()
            .collect())
    }

    fn list_all_budgets(&self, _session: Session) -> Result<Vec<Budget>, ApiError> {
        self.check(Service::Budget)?;
        Ok(self.budgets.lock().unwrap().clone())
    }

    fn budget_ratio(&self, _session: Session, _period: Period) -> Result<Decimal, ApiError> {
        self.check(Service::Budget)?;
        self.ratio.lock().unwrap().ok_or(ApiError::Status {
            service: Service::Budget,
            status: StatusCode::INTERNAL_SERVER_ERROR,
        })
    }

    fn create_budget(&self, budget: &NewBudget) -> Result<Budget, ApiError> {
        self.check(Service::Budget)?;
        let created = Budget {
            id: self.next_id(),
            month: budget.month,
            year: budget.year,
            amount: Decimal::from(budget.amount),
        };
        self.budgets.lock().unwrap().push(created.clone());
        Ok(created)
    }

    fn update_budget(&self, id: &RecordId, budget: &NewBudget) -> Result<Budget, ApiError> {
        self.check(Service::Budget)?;
        let mut rows = self.budgets.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| Self::not_found(Service::Budget))?;
        slot.month = budget.month;
        slot.year = budget.year;
        slot.amount = Decimal::from(budget.amount);
        Ok(slot.clone())
    }

    fn delete_budget(&self, id: &RecordId) -> Result<(), ApiError> {
        self.check(Service::Budget)?;
        self.budgets.lock().unwrap().retain(|b| &b.id != id);
        Ok(())
    }

    fn list_categories(&self, _session: Session) -> Result<Vec<Category>, ApiError> {
        self.check(Service::Category)?;
        Ok(self.categories.lock().unwrap().clone())
    }

    fn create_category(&self, _session: Session, name: &str) -> Result<Category, ApiError> {
        self.check(Service::Category)?;
        let created = Category {
            id: self.next_id(),
            name: name.to_string(),
        };
        self.categories.lock().unwrap().push(created.clone());
        Ok(created)
    }

    fn delete_category(&self, id: &RecordId) -> Result<(), ApiError> {
        self.check(Service::Category)?;
        self.categories.lock().unwrap().retain(|c| &c.id != id);
        Ok(())
    }
}
