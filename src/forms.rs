// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One entry form for expenses and budgets, configured by [`FormOptions`].

use crate::errors::{Field, FieldErrors};
use crate::models::{NewBudget, NewExpense, Period, Session};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\d]").unwrap());
static MONTH_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{2})/(\d{4})$").unwrap());

pub const BUDGET_MIN_YEAR: i32 = 2000;
pub const BUDGET_MAX_YEAR: i32 = 2099;

/// Which inputs the form shows; hidden inputs are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldSet {
    pub category: bool,
    pub amount: bool,
    pub description: bool,
    pub date: bool,
    pub month_year: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
    pub fields: FieldSet,
    pub require_description: bool,
    /// Dates must fall inside this month when set.
    pub date_range: Option<Period>,
    /// Used when the date input is left blank.
    pub default_date: Option<NaiveDate>,
    /// Restricts the category input to these names when set.
    pub categories: Option<Vec<String>>,
}

impl FormOptions {
    /// Expense entry. A blank date becomes `today`, or the first day of
    /// `period` when today lies outside it.
    pub fn expense(period: Option<Period>, today: NaiveDate) -> Self {
        let default_date = match period {
            Some(p) if !p.contains(today) => p.first_day(),
            _ => today,
        };
        Self {
            fields: FieldSet {
                category: true,
                amount: true,
                description: true,
                date: true,
                month_year: false,
            },
            require_description: true,
            date_range: period,
            default_date: Some(default_date),
            categories: None,
        }
    }

    pub fn budget() -> Self {
        Self {
            fields: FieldSet {
                amount: true,
                month_year: true,
                ..FieldSet::default()
            },
            require_description: false,
            date_range: None,
            default_date: None,
            categories: None,
        }
    }

    pub fn with_categories(mut self, names: Vec<String>) -> Self {
        self.categories = Some(names);
        self
    }
}

/// Raw text as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub category: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub month_year: Option<String>,
}

/// Validated values; a field is `Some` exactly when the form shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub category: Option<String>,
    pub amount: Option<u64>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub period: Option<Period>,
}

impl EntryDraft {
    pub fn into_new_expense(self, session: Session) -> Option<NewExpense> {
        Some(NewExpense {
            user_id: session.user_id,
            category: self.category?,
            amount: self.amount?,
            description: self.description.unwrap_or_default(),
            date: self.date?,
        })
    }

    pub fn into_new_budget(self, session: Session) -> Option<NewBudget> {
        let period = self.period?;
        Some(NewBudget {
            user_id: session.user_id,
            month: period.month(),
            year: period.year(),
            amount: self.amount?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct EntryForm {
    options: FormOptions,
}

impl EntryForm {
    pub fn new(options: FormOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Checks every shown field and reports all failures at once.
    pub fn validate(&self, input: &FormInput) -> Result<EntryDraft, FieldErrors> {
        let fields = self.options.fields;
        let mut errors = FieldErrors::new();
        let mut draft = EntryDraft {
            category: None,
            amount: None,
            description: None,
            date: None,
            period: None,
        };

        if fields.category {
            draft.category = self.check_category(input.category.as_deref(), &mut errors);
        }
        if fields.amount {
            match parse_amount(input.amount.as_deref().unwrap_or("")) {
                Ok(v) => draft.amount = Some(v),
                Err(msg) => errors.add(Field::Amount, msg),
            }
        }
        if fields.description {
            let text = input.description.as_deref().unwrap_or("").trim();
            if text.is_empty() && self.options.require_description {
                errors.add(Field::Description, "Description is required");
            } else {
                draft.description = Some(text.to_string());
            }
        }
        if fields.date {
            draft.date = self.check_date(input.date.as_deref(), &mut errors);
        }
        if fields.month_year {
            match parse_month_year(input.month_year.as_deref().unwrap_or("")) {
                Ok(p) => draft.period = Some(p),
                Err(msg) => errors.add(Field::MonthYear, msg),
            }
        }

        if errors.is_empty() {
            Ok(draft)
        } else {
            Err(errors)
        }
    }

    fn check_category(&self, raw: Option<&str>, errors: &mut FieldErrors) -> Option<String> {
        let name = raw.unwrap_or("").trim();
        if name.is_empty() {
            errors.add(Field::Category, "Category is required");
            return None;
        }
        if let Some(known) = &self.options.categories {
            match known.iter().find(|k| k.eq_ignore_ascii_case(name)) {
                Some(k) => return Some(k.clone()),
                None => {
                    errors.add(Field::Category, format!("Unknown category '{}'", name));
                    return None;
                }
            }
        }
        Some(name.to_string())
    }

    fn check_date(&self, raw: Option<&str>, errors: &mut FieldErrors) -> Option<NaiveDate> {
        let raw = raw.unwrap_or("").trim();
        let date = if raw.is_empty() {
            match self.options.default_date {
                Some(d) => d,
                None => {
                    errors.add(Field::Date, "Date is required");
                    return None;
                }
            }
        } else {
            match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(d) => d,
                Err(_) => {
                    errors.add(Field::Date, "Invalid date, expected YYYY-MM-DD");
                    return None;
                }
            }
        };
        if let Some(period) = self.options.date_range {
            if !period.contains(date) {
                errors.add(Field::Date, format!("Date must fall in {}", period.label()));
                return None;
            }
        }
        Some(date)
    }
}

/// Keeps only the digits of an amount input, so `Rp. 1.250.000` reads as
/// `1250000`.
pub fn digits_only(raw: &str) -> String {
    NON_DIGIT.replace_all(raw, "").into_owned()
}

pub fn parse_amount(raw: &str) -> Result<u64, String> {
    let digits = digits_only(raw);
    if digits.is_empty() {
        return Err("Amount is required".into());
    }
    let value: u64 = digits
        .parse()
        .map_err(|_| "Amount is too large".to_string())?;
    if value == 0 {
        return Err("Amount must be greater than zero".into());
    }
    Ok(value)
}

/// Parses `MM/YYYY` with a year in 2000..=2099.
pub fn parse_month_year(raw: &str) -> Result<Period, String> {
    let caps = MONTH_YEAR
        .captures(raw.trim())
        .ok_or_else(|| "Please enter a valid MM/YYYY format".to_string())?;
    let month: u32 = caps[1]
        .parse()
        .map_err(|_| "Please enter a valid MM/YYYY format".to_string())?;
    let year: i32 = caps[2]
        .parse()
        .map_err(|_| "Please enter a valid MM/YYYY format".to_string())?;
    if !(1..=12).contains(&month) {
        return Err("Month must be between 01 and 12".into());
    }
    if !(BUDGET_MIN_YEAR..=BUDGET_MAX_YEAR).contains(&year) {
        return Err("Year must be between 2000 and 2099".into());
    }
    Period::new(month, year).map_err(|e| e.to_string())
}
