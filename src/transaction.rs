use std::any::Any;
use std::fmt;
use std::ops::Add;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// `%Y` alone accepts signed and short years.
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").expect("valid date regex"));

/// A single financial event. Serialized as one `Date,Amount,Category` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Amount")]
    pub amount: Decimal,
    #[serde(rename = "Category")]
    pub category: String,
}

impl Transaction {
    /// Builds a transaction from a `YYYY-MM-DD` date string.
    pub fn new(date: &str, amount: Decimal, category: impl Into<String>) -> Result<Self> {
        Ok(Transaction {
            date: parse_date(date)?,
            amount,
            category: category.into(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Rejects zero and negative amounts.
    pub fn validate_amount(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(FinanceError::Validation("Amount must be positive.".into()));
        }
        Ok(())
    }

    /// Sums the amounts of two transactions, for callers holding untyped values.
    pub fn combine(&self, other: &dyn Any) -> Result<Decimal> {
        let other = other
            .downcast_ref::<Transaction>()
            .ok_or(FinanceError::TypeKind)?;
        self + other
    }
}

impl Add for &Transaction {
    type Output = Result<Decimal>;

    fn add(self, other: &Transaction) -> Result<Decimal> {
        checked_sum(self.amount, other.amount)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Date: {}, Amount: {}, Category: {}",
            self.date.format(DATE_FORMAT),
            self.amount,
            self.category
        )
    }
}

pub fn checked_sum(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| FinanceError::Validation("Amount total overflows.".into()))
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if !DATE_SHAPE.is_match(input) {
        return Err(FinanceError::Format(format!("'{}' does not match YYYY-MM-DD", input)));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|e| {
        FinanceError::Format(format!("'{}' does not match YYYY-MM-DD: {}", input, e))
    })
}

pub fn parse_amount(input: &str) -> Result<Decimal> {
    input
        .trim()
        .parse::<Decimal>()
        .map_err(|e| FinanceError::Format(format!("'{}' is not a number: {}", input.trim(), e)))
}
