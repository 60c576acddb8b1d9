use std::{fs::File, io::Read};

use anyhow::{Context, Result};
use bank_ledger::bin_utils::{ScriptError, Service};
use tracing_subscriber::EnvFilter;

const DEMO_SCRIPT: &str = include_str!("../../demos/demo.csv");

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let input: Box<dyn Read> = match std::env::args().nth(1) {
        Some(filename) => Box::new(
            File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?,
        ),
        None => Box::new(DEMO_SCRIPT.as_bytes()),
    };

    let service = Service {
        input,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| {
            match err {
                ScriptError::Command(err) => eprintln!("Error at line {line}: {err}"),
                ScriptError::Ledger(_) => {
                    // rejected operations are expected outcomes, already logged
                }
            }
        }),
    };
    service.run()
}
