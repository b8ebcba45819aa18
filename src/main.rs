use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use finance_ledger::{
    parse_amount, parse_category_code, parse_date, parse_date_input, render_json, render_text,
    Console, Prompter, QueryEngine, RecordStore, StoreConfig, Transaction, DEFAULT_DATA_FILE,
    VERSION,
};

#[derive(Parser)]
#[command(name = "finance-ledger", version = VERSION, about = "Personal income/expense ledger")]
struct Cli {
    /// CSV file holding the ledger
    #[arg(long, env = "FINANCE_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive menu (default)
    Menu,

    /// Create the ledger file with its header row
    Init,

    /// Append one transaction
    Add {
        /// Amount, greater than 0
        #[arg(long, allow_hyphen_values = true)]
        amount: String,

        /// I for Income, E for Expense
        #[arg(long)]
        category: String,

        /// dd-mm-yyyy, defaults to today
        #[arg(long, default_value = "")]
        date: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Show transactions and summary for an inclusive date range
    View {
        /// dd-mm-yyyy
        #[arg(long)]
        start: String,

        /// dd-mm-yyyy
        #[arg(long)]
        end: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let store = RecordStore::new(StoreConfig::new(cli.data_file));

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => run_menu(&store)?,
        Command::Init => run_init(&store)?,
        Command::Add {
            amount,
            category,
            date,
            description,
        } => run_add(&store, &amount, &category, &date, &description)?,
        Command::View { start, end, json } => run_view(&store, &start, &end, json)?,
    }

    Ok(())
}

fn run_menu(store: &RecordStore) -> Result<()> {
    store
        .initialize()
        .with_context(|| format!("Failed to initialize {}", store.path().display()))?;

    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut console = Console::new(store, prompter, Local::now().date_naive());
    console.run()?;

    Ok(())
}

fn run_init(store: &RecordStore) -> Result<()> {
    if store.initialize()? {
        println!("✓ Created {}", store.path().display());
    } else {
        println!("✓ {} already exists", store.path().display());
    }
    Ok(())
}

fn run_add(
    store: &RecordStore,
    amount: &str,
    category: &str,
    date: &str,
    description: &str,
) -> Result<()> {
    let date = parse_date_input(date, true, Local::now().date_naive())?;
    let amount = parse_amount(amount)?;
    let category = parse_category_code(category)?;
    let transaction = Transaction::new(date, amount, category, description)?;

    store.initialize()?;
    store
        .append(&transaction)
        .context("Failed to add transaction")?;

    println!("Entry added successfully");
    Ok(())
}

fn run_view(store: &RecordStore, start: &str, end: &str, json: bool) -> Result<()> {
    let start = parse_date(start).context("Invalid start date")?;
    let end = parse_date(end).context("Invalid end date")?;

    store
        .initialize()
        .with_context(|| format!("Failed to initialize {}", store.path().display()))?;
    let result = QueryEngine::new(store)
        .run_range(start, end)
        .context("Failed to query transactions")?;

    if json {
        println!("{}", render_json(&result)?);
    } else {
        print!("{}", render_text(&result));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir, name: &str) -> RecordStore {
        RecordStore::new(StoreConfig::new(dir.path().join(name)))
    }

    #[test]
    fn test_view_on_fresh_file_initializes_it() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "new.csv");

        run_view(&store, "01-01-2024", "31-01-2024", false).unwrap();

        assert!(store.path().exists());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_view_rejects_bad_bounds_before_touching_storage() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "untouched.csv");

        assert!(run_view(&store, "2024-01-01", "31-01-2024", false).is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_add_then_view_json() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "ledger.csv");

        run_add(&store, "500", "i", "01-01-2024", "salary").unwrap();
        run_add(&store, "200", "E", "15-01-2024", "rent").unwrap();
        run_view(&store, "01-01-2024", "31-01-2024", true).unwrap();

        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn test_add_rejects_non_positive_amount() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "ledger.csv");

        assert!(run_add(&store, "-5", "E", "", "").is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_cli_version_matches_library() {
        let cli = Cli::try_parse_from(["finance-ledger", "--data-file", "x.csv", "init"]).unwrap();
        assert_eq!(cli.data_file, PathBuf::from("x.csv"));
        assert!(matches!(cli.command, Some(Command::Init)));

        let err = Cli::try_parse_from(["finance-ledger", "--version"]).err().unwrap();
        assert!(err.to_string().contains(VERSION));
    }
}
