// 🧾 Report rendering for query results
//
// Output shape:
//   Transactions from 01-01-2024 to 31-01-2024:
//   date        amount  category  description
//   01-01-2024  500.00  Income    salary
//
//   Summary:
//   Total Income: $500.00
//   Total Expense: $0.00
//   Total Savings: $500.00

use crate::query::{QueryResult, Summary};
use crate::transaction::{format_date, Transaction, COLUMNS};

/// Printed instead of a table (and summary) when nothing matched
pub const NO_TRANSACTIONS: &str = "No transactions found in the given date range.";

/// Render a query result as the console report
pub fn render_text(result: &QueryResult) -> String {
    if result.is_empty() {
        return format!("{}\n", NO_TRANSACTIONS);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Transactions from {} to {}:\n",
        format_date(result.start),
        format_date(result.end)
    ));
    out.push_str(&render_table(&result.transactions));
    out.push('\n');
    out.push_str(&render_summary(&result.summary));
    out
}

/// The three summary lines, two decimals each
pub fn render_summary(summary: &Summary) -> String {
    format!(
        "Summary:\nTotal Income: ${:.2}\nTotal Expense: ${:.2}\nTotal Savings: ${:.2}\n",
        summary.total_income, summary.total_expense, summary.net_savings
    )
}

/// Render a query result as pretty JSON
pub fn render_json(result: &QueryResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

fn cells(tx: &Transaction) -> [String; 4] {
    [
        format_date(tx.date),
        tx.amount
            .map(|a| format!("{:.2}", a))
            .unwrap_or_else(|| "n/a".to_string()),
        tx.category.to_string(),
        tx.description.clone(),
    ]
}

fn render_table(transactions: &[Transaction]) -> String {
    let rows: Vec<[String; 4]> = transactions.iter().map(cells).collect();

    let mut widths = COLUMNS.map(|c| c.len());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = COLUMNS.map(|c| c.to_string());
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
