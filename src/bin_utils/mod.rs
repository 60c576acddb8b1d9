//! Drives a ledger from an operation script and prints the resulting reports.

use std::io::{Read, Write};

use crate::{
    command::{CommandError, LedgerCommand},
    processor::{Ledger, LedgerError, in_memory_ledger::InMemoryLedger},
};
use anyhow::{Context, Result};
use csv_parser::{CsvOperationParser, Operation};
use report_printer::print_reports;
use thiserror::Error;
use tracing::warn;
pub mod csv_parser;
pub mod report_printer;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, ScriptError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut ledger = InMemoryLedger::new();

        for (line, row) in parser {
            let row = row.with_context(|| format!("Malformed script row at line {line}"))?;
            if let Err(err) = execute_row(&mut ledger, row) {
                warn!(line, %err, "script row rejected");
                (self.error_printer)(line, err);
            }
        }

        print_reports(self.output, ledger.accounts())
    }
}

fn execute_row(ledger: &mut impl Ledger, row: Operation) -> Result<(), ScriptError> {
    let command =
        LedgerCommand::parse_command(row.kind, row.customer, row.account, row.to, row.amount)?;
    ledger.execute(command)?;
    Ok(())
}
