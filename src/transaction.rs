// 💵 Transaction - the single entity of the ledger
//
// A transaction is built from validated fields, written once, and rebuilt
// from the table on every query. It has no identity beyond its row.

use crate::error::{LedgerError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Canonical date format (day-month-year, zero padded, four digit year)
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Column order of the persisted table. Must never change.
pub const COLUMNS: [&str; 4] = ["date", "amount", "category", "description"];

/// Parse a date in canonical `DD-MM-YYYY` form
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| LedgerError::InvalidDate(input.to_string()))
}

/// Render a date in canonical `DD-MM-YYYY` form
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Money coming in
    Income,

    /// Money going out
    Expense,

    /// Any other label found in a hand-edited file. Counted in neither total.
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
            Category::Other(label) => label,
        }
    }

    /// Map a persisted category cell back to a category
    pub fn from_label(label: &str) -> Self {
        match label {
            "Income" => Category::Income,
            "Expense" => Category::Expense,
            other => Category::Other(other.to_string()),
        }
    }

    /// Map the console shorthand (`I` / `E`, any case) to a category
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "I" => Some(Category::Income),
            "E" => Some(Category::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    #[serde(serialize_with = "serialize_canonical_date")]
    pub date: NaiveDate,

    /// `None` when the stored amount cell could not be parsed
    pub amount: Option<f64>,

    pub category: Category,

    pub description: String,
}

pub(crate) fn serialize_canonical_date<S: Serializer>(
    date: &NaiveDate,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(*date))
}

impl Transaction {
    /// Create a new transaction ready to append.
    ///
    /// The amount must be finite and strictly positive, and the category
    /// must be Income or Expense.
    pub fn new(
        date: NaiveDate,
        amount: f64,
        category: Category,
        description: impl Into<String>,
    ) -> Result<Self> {
        if !amount.is_finite() {
            return Err(LedgerError::InvalidAmount(format!(
                "Amount must be a number, got {}",
                amount
            )));
        }
        if amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(
                "Amount must be greater than 0".to_string(),
            ));
        }
        if let Category::Other(label) = &category {
            return Err(LedgerError::InvalidCategory(label.clone()));
        }

        Ok(Transaction {
            date,
            amount: Some(amount),
            category,
            description: description.into(),
        })
    }

    pub fn is_income(&self) -> bool {
        self.category == Category::Income
    }

    pub fn is_expense(&self) -> bool {
        self.category == Category::Expense
    }
}

// ============================================================================
// PERSISTED ROW
// ============================================================================

/// One row of the table exactly as stored: four text cells in fixed order
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        TransactionRow {
            date: format_date(tx.date),
            amount: tx.amount.map(|a| a.to_string()).unwrap_or_default(),
            category: tx.category.as_str().to_string(),
            description: tx.description.clone(),
        }
    }
}

impl TransactionRow {
    /// Rebuild a transaction from a stored row.
    ///
    /// A bad date is fatal. A bad amount becomes `None`.
    pub fn into_transaction(self, line: u64) -> Result<Transaction> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|e| {
            LedgerError::MalformedRecord {
                line,
                reason: format!("invalid date '{}': {}", self.date, e),
            }
        })?;

        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite());
        if amount.is_none() {
            log::warn!(
                "Line {}: amount '{}' is not a number, treating as missing",
                line,
                self.amount
            );
        }

        Ok(Transaction {
            date,
            amount,
            category: Category::from_label(self.category.trim()),
            description: self.description,
        })
    }
}
