// ⌨️ Console input - validation + re-prompting
//
// Every prompt is a plain loop: read a line, validate it, print the
// validation message and ask again until the input is acceptable.

use crate::error::{LedgerError, Result};
use crate::transaction::{parse_date, Category};
use chrono::NaiveDate;
use std::io::{BufRead, Write};

// ============================================================================
// VALIDATION
// ============================================================================

/// Parse a date answer. Empty input means `today` when a default is allowed.
pub fn parse_date_input(input: &str, allow_default: bool, today: NaiveDate) -> Result<NaiveDate> {
    if allow_default && input.trim().is_empty() {
        return Ok(today);
    }
    parse_date(input)
}

/// Parse an amount answer: a finite number strictly greater than zero
pub fn parse_amount(input: &str) -> Result<f64> {
    let amount: f64 = input.trim().parse().map_err(|_| {
        LedgerError::InvalidAmount(format!("Amount must be a number, got '{}'", input.trim()))
    })?;

    if !amount.is_finite() {
        return Err(LedgerError::InvalidAmount(format!(
            "Amount must be a number, got '{}'",
            input.trim()
        )));
    }
    if amount <= 0.0 {
        return Err(LedgerError::InvalidAmount(
            "Amount must be greater than 0".to_string(),
        ));
    }

    Ok(amount)
}

/// Parse a category shorthand: `I` for Income, `E` for Expense (any case)
pub fn parse_category_code(input: &str) -> Result<Category> {
    Category::from_code(input).ok_or_else(|| LedgerError::InvalidCategory(input.to_string()))
}

// ============================================================================
// PROMPTER
// ============================================================================

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print a line to the console
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message).map_err(LedgerError::Console)
    }

    /// Show `prompt` and read one line, without the line terminator
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt).map_err(LedgerError::Console)?;
        self.output.flush().map_err(LedgerError::Console)?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(LedgerError::Console)?;
        if read == 0 {
            return Err(LedgerError::InputClosed);
        }

        let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Ask until `parse` accepts the answer. Validation errors are printed
    /// and the question repeats; anything else is returned.
    pub fn ask<T>(&mut self, prompt: &str, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
        loop {
            let answer = self.read_line(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_input_validation() => self.say(&err.to_string())?,
                Err(err) => return Err(err),
            }
        }
    }

    pub fn date(&mut self, prompt: &str, allow_default: bool, today: NaiveDate) -> Result<NaiveDate> {
        self.ask(prompt, |answer| parse_date_input(answer, allow_default, today))
    }

    pub fn amount(&mut self) -> Result<f64> {
        self.ask("Enter the amount: ", parse_amount)
    }

    pub fn category(&mut self) -> Result<Category> {
        self.ask(
            "Enter the category ('I' for Income or 'E' for Expense): ",
            parse_category_code,
        )
    }

    pub fn description(&mut self) -> Result<String> {
        self.read_line("Enter the description (optional): ")
    }
}
