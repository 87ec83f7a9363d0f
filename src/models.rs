// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{ColorError, PeriodError};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Categories offered before the user adds any of their own.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Food",
    "Transport",
    "Entertainment",
    "Utilities",
    "Shopping",
    "Health",
    "Other",
];

/// Backend identifier. Services send either numbers or strings; two ids are
/// equal when they print the same, so `Num(5)` matches `Text("5")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Num(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Num(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RecordId::Num(a), RecordId::Num(b)) => a == b,
            (RecordId::Text(a), RecordId::Text(b)) => a == b,
            (RecordId::Num(n), RecordId::Text(t)) | (RecordId::Text(t), RecordId::Num(n)) => {
                *t == n.to_string()
            }
        }
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            RecordId::Num(n) => n.to_string().hash(state),
            RecordId::Text(t) => t.hash(state),
        }
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(n) => RecordId::Num(n),
            Err(_) => RecordId::Text(s.to_string()),
        })
    }
}

/// Who the data-fetching calls act for. Passed explicitly to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
}

/// A calendar month of a year, used as the period filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    month: u32,
    year: i32,
}

impl Period {
    pub const MIN_YEAR: i32 = 2000;
    pub const MAX_YEAR: i32 = 9999;

    pub fn new(month: u32, year: i32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::Month(month));
        }
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(PeriodError::Year(year));
        }
        Ok(Self { month, year })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Long form, e.g. "October 2026".
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap());

/// A `#rrggbb` display colour, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let s = s.trim();
        if !HEX_COLOR.is_match(s) {
            return Err(ColorError(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    #[serde(alias = "categoryName")]
    pub category: String,
    pub amount: u64,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_wire_date")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpense {
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub category: String,
    pub amount: u64,
    pub description: String,
    pub date: NaiveDate,
}

impl NewExpense {
    /// The record as it looks once the backend has assigned `id`.
    pub fn into_expense(self, id: RecordId) -> Expense {
        Expense {
            id,
            category: self.category,
            amount: self.amount,
            description: self.description,
            date: self.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: RecordId,
    pub month: u32,
    pub year: i32,
    pub amount: Decimal,
}

impl Budget {
    pub fn period(&self) -> Result<Period, PeriodError> {
        Period::new(self.month, self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBudget {
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub month: u32,
    pub year: i32,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
}

/// Accepts `YYYY-MM-DD` as well as full ISO timestamps such as
/// `2025-05-01T00:00:00.000Z`; only the calendar date is kept.
fn deserialize_wire_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let day = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
}
