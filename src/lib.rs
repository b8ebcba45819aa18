// Finance Ledger - Core Library
// Exposes the record store, query engine and console harness for the CLI and tests

pub mod config;
pub mod console;
pub mod error;
pub mod input;
pub mod query;
pub mod report;
pub mod store;
pub mod transaction;

// Re-export commonly used types
pub use config::{StoreConfig, DEFAULT_DATA_FILE};
pub use console::{Console, MenuChoice};
pub use error::{LedgerError, Result};
pub use input::{parse_amount, parse_category_code, parse_date_input, Prompter};
pub use query::{filter_by_range, QueryEngine, QueryResult, Summary};
pub use report::{render_json, render_summary, render_text, NO_TRANSACTIONS};
pub use store::RecordStore;
pub use transaction::{
    format_date, parse_date, Category, Transaction, TransactionRow, COLUMNS, DATE_FORMAT,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
