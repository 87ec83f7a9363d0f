// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// The backend collaborator a request was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Expense,
    Budget,
    Category,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::Expense => "expense",
            Service::Budget => "budget",
            Service::Category => "category",
        };
        f.write_str(name)
    }
}

/// Failures talking to a backend service. Never retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{service} service unreachable: {source}")]
    Transport {
        service: Service,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} service returned {status}")]
    Status {
        service: Service,
        status: reqwest::StatusCode,
    },

    #[error("{service} service sent an unreadable response: {source}")]
    Decode {
        service: Service,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub fn service(&self) -> Service {
        match self {
            ApiError::Transport { service, .. }
            | ApiError::Status { service, .. }
            | ApiError::Decode { service, .. } => *service,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Month must be between 01 and 12 (got {0})")]
    Month(u32),
    #[error("Year must be between 2000 and 9999 (got {0})")]
    Year(i32),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid colour '{0}', expected #rrggbb")]
pub struct ColorError(pub String);

/// Input field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Category,
    Amount,
    Description,
    Date,
    MonthYear,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Category => "category",
            Field::Amount => "amount",
            Field::Description => "description",
            Field::Date => "date",
            Field::MonthYear => "month/year",
        };
        f.write_str(name)
    }
}

/// Every failed rule of a submitted form, one message per field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message recorded for a field.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, msg) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, msg)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}
