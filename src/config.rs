// ⚙️ Store configuration
//
// The storage location is passed in explicitly so that tests (and users)
// can point the ledger at any file.

use std::path::{Path, PathBuf};

/// File used when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "finance_data.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_DATA_FILE)
    }
}
