// 🖥️ Console harness - the add / view / exit menu
//
// Storage and record errors end the current operation only; the menu keeps
// running. End of input behaves like choosing Exit.

use crate::error::{LedgerError, Result};
use crate::input::Prompter;
use crate::query::QueryEngine;
use crate::report::render_text;
use crate::store::RecordStore;
use crate::transaction::Transaction;
use chrono::NaiveDate;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::View),
            "3" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub struct Console<'a, R, W> {
    store: &'a RecordStore,
    prompter: Prompter<R, W>,
    today: NaiveDate,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(store: &'a RecordStore, prompter: Prompter<R, W>, today: NaiveDate) -> Self {
        Console {
            store,
            prompter,
            today,
        }
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Run the menu until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.prompter.say("\n1. Add a new transaction")?;
            self.prompter.say("2. View transactions and summary")?;
            self.prompter.say("3. Exit")?;

            let answer = match self.prompter.read_line("Choose between (1-3): ") {
                Ok(answer) => answer,
                Err(LedgerError::InputClosed) => return self.exit(),
                Err(err) => return Err(err),
            };

            let outcome = match MenuChoice::parse(&answer) {
                Some(MenuChoice::Add) => self.add(),
                Some(MenuChoice::View) => self.view(),
                Some(MenuChoice::Exit) => return self.exit(),
                None => self
                    .prompter
                    .say("Invalid choice. Please select 1, 2, or 3."),
            };

            match outcome {
                Ok(()) => {}
                Err(LedgerError::InputClosed) => return self.exit(),
                Err(err @ LedgerError::Console(_)) => return Err(err),
                Err(err) => {
                    log::error!("Operation failed: {}", err);
                    self.prompter.say(&format!("Error: {}", err))?;
                }
            }
        }
    }

    /// Collect one transaction and append it
    pub fn add(&mut self) -> Result<()> {
        self.store.initialize()?;

        let date = self.prompter.date(
            "Enter the date of the transaction (dd-mm-yyyy): ",
            true,
            self.today,
        )?;
        let amount = self.prompter.amount()?;
        let category = self.prompter.category()?;
        let description = self.prompter.description()?;

        let transaction = Transaction::new(date, amount, category, description)?;
        self.store.append(&transaction)?;
        self.prompter.say("Entry added successfully")
    }

    /// Ask for a date range and print the report
    pub fn view(&mut self) -> Result<()> {
        let start = self
            .prompter
            .date("Enter the start date (dd-mm-yyyy): ", false, self.today)?;
        let end = self
            .prompter
            .date("Enter the end date (dd-mm-yyyy): ", false, self.today)?;

        let result = QueryEngine::new(self.store).run_range(start, end)?;
        self.prompter.say(render_text(&result).trim_end())
    }

    fn exit(&mut self) -> Result<()> {
        self.prompter.say("Exiting...")
    }
}
