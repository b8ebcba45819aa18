// ⚠️ Ledger Errors
//
// Input validation errors are recovered by re-prompting in the console.
// Storage errors end the requested operation but never the process.

use std::path::PathBuf;

/// Every failure the ledger can report
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    // ========================================================================
    // INPUT VALIDATION (recovered locally)
    // ========================================================================
    #[error("Enter a valid date format: %d-%m-%Y")]
    InvalidDate(String),

    #[error("{0}")]
    InvalidAmount(String),

    #[error("Invalid entry. Please select I for Income and E for Expense")]
    InvalidCategory(String),

    /// Console input reached end of stream while a prompt was waiting
    #[error("Input closed")]
    InputClosed,

    #[error("Console I/O failed: {0}")]
    Console(#[source] std::io::Error),

    // ========================================================================
    // STORAGE
    // ========================================================================
    #[error("Failed to write ledger file {}: {source}", .path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read ledger file {}: {source}", .path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
}

impl LedgerError {
    /// True for the errors a prompt recovers from by asking again
    pub fn is_input_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidDate(_)
                | LedgerError::InvalidAmount(_)
                | LedgerError::InvalidCategory(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
