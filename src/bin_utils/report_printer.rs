use std::io::Write;

use anyhow::Context;

use crate::account::Account;

/// Writes the details report of every account, separated by blank lines.
pub fn print_reports<'a, W>(
    output: &mut W,
    accounts: impl Iterator<Item = &'a Account>,
) -> anyhow::Result<()>
where
    W: Write,
{
    for (i, acc) in accounts.enumerate() {
        if i > 0 {
            writeln!(output).context("Failed to write report")?;
        }
        write!(output, "{}", acc.details()).context("Failed to write report")?;
    }
    // Ensure all data is flushed to the output
    output.flush().context("Failed to flush report output")?;
    Ok(())
}
