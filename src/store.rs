// 🗄️ Record Store - append-only CSV table of transactions
//
// Layout:
//   date,amount,category,description
//   17-07-2024,100,Expense,Bought vegetables and fruits

use crate::config::StoreConfig;
use crate::error::{LedgerError, Result};
use crate::transaction::{Transaction, TransactionRow, COLUMNS};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::path::Path;

pub struct RecordStore {
    config: StoreConfig,
}

impl RecordStore {
    pub fn new(config: StoreConfig) -> Self {
        RecordStore { config }
    }

    pub fn path(&self) -> &Path {
        self.config.path()
    }

    /// Make sure the table exists with its header row.
    ///
    /// Returns `true` when the file was created. An existing file is left
    /// untouched, so calling this repeatedly is safe.
    pub fn initialize(&self) -> Result<bool> {
        let path = self.path();
        if path.exists() {
            debug!("Ledger file {} already present", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| self.write_error(e))?;

        let mut writer = WriterBuilder::new().from_writer(file);
        writer
            .write_record(COLUMNS)
            .map_err(|e| self.write_error(e.into()))?;
        writer.flush().map_err(|e| self.write_error(e))?;

        info!("Created ledger file {}", path.display());
        Ok(true)
    }

    /// Append one row to the end of the table.
    ///
    /// The file is not recreated here: if it disappeared after `initialize`,
    /// the write fails with `StorageWrite`.
    pub fn append(&self, transaction: &Transaction) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(self.path())
            .map_err(|e| self.write_error(e))?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer
            .serialize(TransactionRow::from(transaction))
            .map_err(|e| self.write_error(e.into()))?;
        writer.flush().map_err(|e| self.write_error(e))?;

        debug!(
            "Appended {} {} on {} to {}",
            transaction.category,
            transaction.amount.unwrap_or_default(),
            transaction.date,
            self.path().display()
        );
        Ok(())
    }

    /// Read the whole table in stored order.
    ///
    /// A malformed date (or a row with the wrong number of cells) aborts the
    /// load. There is no row-skip policy.
    pub fn load_all(&self) -> Result<Vec<Transaction>> {
        let file = File::open(self.path()).map_err(|e| self.read_error(e))?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| self.csv_read_error(e))?
            .clone();

        let mut transactions = Vec::new();
        let mut record = StringRecord::new();

        while reader
            .read_record(&mut record)
            .map_err(|e| self.csv_read_error(e))?
        {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: TransactionRow =
                record
                    .deserialize(Some(&headers))
                    .map_err(|e| LedgerError::MalformedRecord {
                        line,
                        reason: e.to_string(),
                    })?;
            transactions.push(row.into_transaction(line)?);
        }

        debug!(
            "Loaded {} transactions from {}",
            transactions.len(),
            self.path().display()
        );
        Ok(transactions)
    }

    // ========================================================================
    // ERROR MAPPING
    // ========================================================================

    fn write_error(&self, source: std::io::Error) -> LedgerError {
        LedgerError::StorageWrite {
            path: self.path().to_path_buf(),
            source,
        }
    }

    fn read_error(&self, source: std::io::Error) -> LedgerError {
        LedgerError::StorageRead {
            path: self.path().to_path_buf(),
            source,
        }
    }

    fn csv_read_error(&self, err: csv::Error) -> LedgerError {
        if err.is_io_error() {
            return self.read_error(err.into());
        }

        LedgerError::MalformedRecord {
            line: err.position().map(|p| p.line()).unwrap_or_default(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::Category;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> RecordStore {
        RecordStore::new(StoreConfig::new(dir.path().join("finance_data.csv")))
    }

    fn tx(date: &str, amount: f64, category: Category, description: &str) -> Transaction {
        let date = NaiveDate::parse_from_str(date, "%d-%m-%Y").unwrap();
        Transaction::new(date, amount, category, description).unwrap()
    }

    #[test]
    fn test_initialize_creates_header_only() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.initialize().unwrap());

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "date,amount,category,description\n");
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.initialize().unwrap());
        for _ in 0..5 {
            assert!(!store.initialize().unwrap());
        }

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "date,amount,category,description\n");
    }

    #[test]
    fn test_initialize_leaves_existing_file_alone() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.initialize().unwrap();
        store
            .append(&tx("01-01-2024", 500.0, Category::Income, "salary"))
            .unwrap();

        store.initialize().unwrap();

        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_initialize_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(StoreConfig::new(dir.path().join("nested/deeper/data.csv")));

        assert!(store.initialize().unwrap());
        assert!(store.path().exists());
    }

    #[test]
    fn test_append_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.initialize().unwrap();

        let salary = tx("05-03-2024", 1234.56, Category::Income, "salary, March");
        let rent = tx("06-03-2024", 12.5, Category::Expense, "");
        store.append(&salary).unwrap();
        store.append(&rent).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, vec![salary, rent]);
        assert_eq!(loaded[0].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_append_writes_full_category_word() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.initialize().unwrap();

        store
            .append(&tx("17-07-2024", 100.0, Category::Expense, "Bought vegetables and fruits"))
            .unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            "date,amount,category,description\n17-07-2024,100,Expense,Bought vegetables and fruits\n"
        );
    }

    #[test]
    fn test_append_without_file_is_write_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.initialize().unwrap();
        fs::remove_file(store.path()).unwrap();

        let result = store.append(&tx("01-01-2024", 10.0, Category::Income, ""));

        assert!(matches!(result, Err(LedgerError::StorageWrite { .. })));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_load_without_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(matches!(store.load_all(), Err(LedgerError::StorageRead { .. })));
    }

    #[test]
    fn test_load_keeps_unparsable_amount_as_missing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "date,amount,category,description\n01-01-2024,lots,Income,bonus\n02-01-2024,20,Expense,\n",
        )
        .unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].amount, None);
        assert_eq!(loaded[1].amount, Some(20.0));
        assert_eq!(loaded[1].description, "");
    }

    #[test]
    fn test_load_aborts_on_malformed_date() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "date,amount,category,description\n01-01-2024,10,Income,ok\n2024-01-02,10,Income,bad\n",
        )
        .unwrap();

        match store.load_all() {
            Err(LedgerError::MalformedRecord { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_load_aborts_on_wrong_field_count() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "date,amount,category,description\n01-01-2024,10,Income\n",
        )
        .unwrap();

        assert!(matches!(
            store.load_all(),
            Err(LedgerError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_load_keeps_foreign_category_labels() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "date,amount,category,description\n17-07-2024,100,Groceries,Bought vegetables and fruits\n",
        )
        .unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded[0].category, Category::Other("Groceries".to_string()));
    }
}
