use std::io::{BufRead, Write};

use log::{debug, info};

use crate::error::{FinanceError, Result};
use crate::store::TransactionStore;
use crate::transaction::{self, DATE_FORMAT, Transaction};

const MENU: &str = "\n1. Add Transaction\n2. List Transactions\n3. Exit";

/// Interactive add/list menu over any line-based input and output.
pub struct Console<'a, R, W> {
    input: R,
    output: W,
    store: &'a mut TransactionStore,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(input: R, output: W, store: &'a mut TransactionStore) -> Self {
        Console { input, output, store }
    }

    /// Runs the menu until the user exits or input ends.
    /// Bad input and rejected transactions are reported and the loop goes on.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };
            match choice.as_str() {
                "1" => {
                    if !self.add_transaction()? {
                        break;
                    }
                }
                "2" => self.list_transactions()?,
                "3" => break,
                _ => writeln!(self.output, "Invalid option, please try again.")?,
            }
        }
        info!("Leaving with {}", self.store);
        Ok(())
    }

    // Returns false when input ran out mid-prompt.
    fn add_transaction(&mut self) -> Result<bool> {
        let Some(date) = self.prompt("Enter the transaction date (YYYY-MM-DD): ")? else {
            return Ok(false);
        };
        let Some(amount) = self.prompt("Enter the transaction amount: ")? else {
            return Ok(false);
        };
        let amount = match transaction::parse_amount(&amount) {
            Ok(amount) => amount,
            Err(e) => return self.report(e).map(|_| true),
        };
        let Some(category) = self.prompt("Enter the transaction category: ")? else {
            return Ok(false);
        };

        let result = Transaction::new(&date, amount, category)
            .and_then(|transaction| self.store.add(transaction));
        match result {
            Ok(()) => {
                debug!("Store now holds {} transactions", self.store.len());
                writeln!(self.output, "Transaction added successfully.")?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(true)
    }

    fn list_transactions(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.output, "No transactions recorded.")?;
            return Ok(());
        }
        for transaction in self.store.list() {
            writeln!(
                self.output,
                "{}, {}, {}",
                transaction.date().format(DATE_FORMAT),
                transaction.amount,
                transaction.category
            )?;
        }
        match self.store.total() {
            Ok(total) => writeln!(self.output, "Total: {}", total)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn report(&mut self, error: FinanceError) -> Result<()> {
        if !error.is_recoverable() {
            return Err(error);
        }
        writeln!(self.output, "{}", error)?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
