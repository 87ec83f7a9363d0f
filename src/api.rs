// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Backend collaborators: expense, budget and category services.

use crate::config::Endpoints;
use crate::errors::{ApiError, Service};
use crate::models::{Budget, Category, Expense, NewBudget, NewExpense, Period, RecordId, Session};
use crate::utils::http_client;
use reqwest::blocking::{Client, RequestBuilder};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;

/// Upper bound on server pages walked by [`Backend::fetch_period`].
pub const MAX_SERVER_PAGES: usize = 100;

pub trait Backend: Send + Sync {
    /// One server-side page (1-indexed) of a period's expenses.
    fn list_expenses(
        &self,
        session: Session,
        period: Period,
        page: usize,
    ) -> Result<Vec<Expense>, ApiError>;
    fn sum_expenses(&self, session: Session, period: Period) -> Result<u64, ApiError>;
    fn create_expense(&self, expense: &NewExpense) -> Result<Expense, ApiError>;
    fn update_expense(&self, id: &RecordId, expense: &NewExpense) -> Result<Expense, ApiError>;
    fn delete_expense(&self, id: &RecordId) -> Result<(), ApiError>;

    fn list_budgets(&self, session: Session, period: Period) -> Result<Vec<Budget>, ApiError>;
    fn list_all_budgets(&self, session: Session) -> Result<Vec<Budget>, ApiError>;
    /// Expenses total divided by the budget amount, as computed by the service.
    fn budget_ratio(&self, session: Session, period: Period) -> Result<Decimal, ApiError>;
    fn create_budget(&self, budget: &NewBudget) -> Result<Budget, ApiError>;
    fn update_budget(&self, id: &RecordId, budget: &NewBudget) -> Result<Budget, ApiError>;
    fn delete_budget(&self, id: &RecordId) -> Result<(), ApiError>;

    fn list_categories(&self, session: Session) -> Result<Vec<Category>, ApiError>;
    fn create_category(&self, session: Session, name: &str) -> Result<Category, ApiError>;
    fn delete_category(&self, id: &RecordId) -> Result<(), ApiError>;

    /// Every expense of `period`, walking server pages until one adds no
    /// record not already seen. Servers that ignore the page number and
    /// return the whole period each time therefore stop after page two.
    fn fetch_period(&self, session: Session, period: Period) -> Result<Vec<Expense>, ApiError> {
        let mut all = Vec::new();
        let mut seen = HashSet::new();
        for page in 1..=MAX_SERVER_PAGES {
            let batch = self.list_expenses(session, period, page)?;
            let before = all.len();
            for e in batch {
                if seen.insert(e.id.clone()) {
                    all.push(e);
                }
            }
            if all.len() == before {
                tracing::debug!(%period, page, "no new records, done paging");
                return Ok(all);
            }
        }
        tracing::warn!(%period, "stopped after {} server pages", MAX_SERVER_PAGES);
        Ok(all)
    }
}

/// Whole units of a `mny/sum` body; `null`, negative or oversized sums read
/// as zero.
pub fn sum_units(sum: Option<Decimal>) -> u64 {
    sum.and_then(|d| d.trunc().to_u64()).unwrap_or(0)
}

/// A `budget/check` body; `null` means no ratio.
pub fn ratio_or_zero(ratio: Option<Decimal>) -> Decimal {
    ratio.unwrap_or(Decimal::ZERO)
}

#[derive(Serialize)]
struct PeriodQuery {
    #[serde(rename = "userID")]
    user_id: i64,
    month: u32,
    year: i32,
}

impl PeriodQuery {
    fn new(session: Session, period: Period) -> Self {
        Self {
            user_id: session.user_id,
            month: period.month(),
            year: period.year(),
        }
    }
}

#[derive(Serialize)]
struct UserQuery {
    #[serde(rename = "userID")]
    user_id: i64,
}

#[derive(Serialize)]
struct NewCategory<'a> {
    #[serde(rename = "userID")]
    user_id: i64,
    name: &'a str,
}

pub struct HttpBackend {
    client: Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(endpoints: Endpoints, timeout_secs: u64) -> reqwest::Result<Self> {
        Ok(Self {
            client: http_client(timeout_secs)?,
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn post<B: Serialize>(&self, service: Service, path: &str, body: &B) -> RequestBuilder {
        let url = self.endpoints.url(service, path);
        tracing::debug!(%service, %url, "POST");
        self.client.post(url).json(body)
    }

    fn put<B: Serialize>(&self, service: Service, path: &str, body: &B) -> RequestBuilder {
        let url = self.endpoints.url(service, path);
        tracing::debug!(%service, %url, "PUT");
        self.client.put(url).json(body)
    }

    fn delete(&self, service: Service, path: &str) -> RequestBuilder {
        let url = self.endpoints.url(service, path);
        tracing::debug!(%service, %url, "DELETE");
        self.client.delete(url)
    }

    fn send(
        &self,
        service: Service,
        req: RequestBuilder,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let resp = req
            .send()
            .map_err(|source| ApiError::Transport { service, source })?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%service, %status, "request failed");
            return Err(ApiError::Status { service, status });
        }
        Ok(resp)
    }

    fn fetch<T: DeserializeOwned>(&self, service: Service, req: RequestBuilder) -> Result<T, ApiError> {
        self.send(service, req)?
            .json()
            .map_err(|source| ApiError::Decode { service, source })
    }
}

impl Backend for HttpBackend {
    fn list_expenses(
        &self,
        session: Session,
        period: Period,
        page: usize,
    ) -> Result<Vec<Expense>, ApiError> {
        let req = self.post(
            Service::Expense,
            &format!("api/expense/mny/{}", page),
            &PeriodQuery::new(session, period),
        );
        self.fetch(Service::Expense, req)
    }

    fn sum_expenses(&self, session: Session, period: Period) -> Result<u64, ApiError> {
        let req = self.post(
            Service::Expense,
            "api/expense/mny/sum",
            &PeriodQuery::new(session, period),
        );
        // An empty period may come back as null.
        let sum: Option<Decimal> = self.fetch(Service::Expense, req)?;
        Ok(sum_units(sum))
    }

    fn create_expense(&self, expense: &NewExpense) -> Result<Expense, ApiError> {
        let req = self.post(Service::Expense, "api/expense", expense);
        self.fetch(Service::Expense, req)
    }

    fn update_expense(&self, id: &RecordId, expense: &NewExpense) -> Result<Expense, ApiError> {
        let req = self.put(Service::Expense, &format!("api/expense/{}", id), expense);
        self.fetch(Service::Expense, req)
    }

    fn delete_expense(&self, id: &RecordId) -> Result<(), ApiError> {
        let req = self.delete(Service::Expense, &format!("api/expense/{}", id));
        self.send(Service::Expense, req).map(|_| ())
    }

    fn list_budgets(&self, session: Session, period: Period) -> Result<Vec<Budget>, ApiError> {
        let req = self.post(
            Service::Budget,
            "api/budget/mny",
            &PeriodQuery::new(session, period),
        );
        self.fetch(Service::Budget, req)
    }

    fn list_all_budgets(&self, session: Session) -> Result<Vec<Budget>, ApiError> {
        let req = self.post(
            Service::Budget,
            "api/budget/user",
            &UserQuery {
                user_id: session.user_id,
            },
        );
        self.fetch(Service::Budget, req)
    }

    fn budget_ratio(&self, session: Session, period: Period) -> Result<Decimal, ApiError> {
        let req = self.post(
            Service::Budget,
            "api/budget/check",
            &PeriodQuery::new(session, period),
        );
        let ratio: Option<Decimal> = self.fetch(Service::Budget, req)?;
        Ok(ratio_or_zero(ratio))
    }

    fn create_budget(&self, budget: &NewBudget) -> Result<Budget, ApiError> {
        let req = self.post(Service::Budget, "api/budget", budget);
        self.fetch(Service::Budget, req)
    }

    fn update_budget(&self, id: &RecordId, budget: &NewBudget) -> Result<Budget, ApiError> {
        let req = self.put(Service::Budget, &format!("api/budget/{}", id), budget);
        self.fetch(Service::Budget, req)
    }

    fn delete_budget(&self, id: &RecordId) -> Result<(), ApiError> {
        let req = self.delete(Service::Budget, &format!("api/budget/{}", id));
        self.send(Service::Budget, req).map(|_| ())
    }

    fn list_categories(&self, session: Session) -> Result<Vec<Category>, ApiError> {
        let req = self.post(
            Service::Category,
            "api/category/user",
            &UserQuery {
                user_id: session.user_id,
            },
        );
        self.fetch(Service::Category, req)
    }

    fn create_category(&self, session: Session, name: &str) -> Result<Category, ApiError> {
        let req = self.post(
            Service::Category,
            "api/category",
            &NewCategory {
                user_id: session.user_id,
                name,
            },
        );
        self.fetch(Service::Category, req)
    }

    fn delete_category(&self, id: &RecordId) -> Result<(), ApiError> {
        let req = self.delete(Service::Category, &format!("api/category/{}", id));
        self.send(Service::Category, req).map(|_| ())
    }
}
