// 🔎 Query Engine - date-range filter + income/expense summary
//
// Formula:
//   net_savings = total_income - total_expense
//
// The engine only produces data. Rendering lives in `report`.

use crate::error::Result;
use crate::store::RecordStore;
use crate::transaction::{parse_date, serialize_canonical_date, Transaction};
use chrono::NaiveDate;
use serde::Serialize;

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_savings: f64,
}

impl Summary {
    /// Sum Income and Expense amounts. Missing amounts and foreign
    /// categories add nothing. Empty totals are positive zero.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let total_income: f64 = transactions
            .iter()
            .filter(|tx| tx.is_income())
            .filter_map(|tx| tx.amount)
            .fold(0.0, |acc, a| acc + a);

        let total_expense: f64 = transactions
            .iter()
            .filter(|tx| tx.is_expense())
            .filter_map(|tx| tx.amount)
            .fold(0.0, |acc, a| acc + a);

        Summary {
            total_income,
            total_expense,
            net_savings: total_income - total_expense,
        }
    }
}

// ============================================================================
// QUERY RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    #[serde(serialize_with = "serialize_canonical_date")]
    pub start: NaiveDate,
    #[serde(serialize_with = "serialize_canonical_date")]
    pub end: NaiveDate,
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Keep transactions with `start <= date <= end`, preserving order.
///
/// An inverted range matches nothing.
pub fn filter_by_range(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| start <= tx.date && tx.date <= end)
        .cloned()
        .collect()
}

// ============================================================================
// QUERY ENGINE
// ============================================================================

pub struct QueryEngine<'a> {
    store: &'a RecordStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        QueryEngine { store }
    }

    /// Run a query with canonical `DD-MM-YYYY` bounds
    pub fn run(&self, start: &str, end: &str) -> Result<QueryResult> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        self.run_range(start, end)
    }

    /// Load the table fresh and summarize `[start, end]`
    pub fn run_range(&self, start: NaiveDate, end: NaiveDate) -> Result<QueryResult> {
        let all = self.store.load_all()?;
        let transactions = filter_by_range(&all, start, end);
        let summary = Summary::from_transactions(&transactions);

        log::debug!(
            "Query {} to {}: {} of {} transactions",
            start,
            end,
            transactions.len(),
            all.len()
        );

        Ok(QueryResult {
            start,
            end,
            transactions,
            summary,
        })
    }
}
