use std::{cell::RefCell, rc::Rc, str::from_utf8};

use bank_ledger::{
    account::AccountError,
    bin_utils::{ScriptError, Service},
    command::CommandError,
    processor::LedgerError,
};

const TEST_FILE: &str = include_str!("script.csv");
const DEMO_FILE: &str = include_str!("../demos/demo.csv");

fn run_script(script: &str) -> (String, Vec<ScriptError>) {
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&errors);
    let mut output = Vec::new();
    let service = Service {
        input: script.as_bytes(),
        output: &mut output,
        error_printer: Box::new(move |_line: u64, err: ScriptError| {
            sink.borrow_mut().push(err)
        }),
    };
    service.run().unwrap();
    let errors = errors.take();
    (from_utf8(&output).unwrap().to_owned(), errors)
}

fn field<'a>(report: &'a str, label: &str) -> Vec<&'a str> {
    report
        .lines()
        .filter_map(|line| line.strip_prefix(label))
        .collect()
}

#[test]
fn process_script() {
    let (report, errors) = run_script(TEST_FILE);

    assert_eq!(errors.len(), 4);
    assert!(matches!(
        errors[0],
        ScriptError::Ledger(LedgerError::Account(AccountError::InsufficientFunds { .. }))
    ));
    assert!(matches!(
        errors[1],
        ScriptError::Ledger(LedgerError::AccountNotFound(9))
    ));
    assert!(matches!(
        errors[2],
        ScriptError::Command(CommandError::AmountRequired { .. })
    ));
    assert!(matches!(
        errors[3],
        ScriptError::Ledger(LedgerError::SameAccount(2))
    ));

    let accounts: Vec<&str> = report.split("\n\nAccount ID: ").collect();
    assert_eq!(accounts.len(), 3);
    assert_eq!(field(&report, "Balance: "), vec!["1200", "600", "12.50"]);
    assert_eq!(field(&report, "Customer ID: "), vec!["1", "2", "3"]);
}

#[test]
fn demo_script_report() {
    let (report, errors) = run_script(DEMO_FILE);
    assert!(errors.is_empty());

    assert!(report.starts_with(
        "Account ID: 1\nCustomer ID: 1\nBalance: 1200\nTransaction History:\n"
    ));
    assert_eq!(field(&report, "Balance: "), vec!["1200", "600"]);
    assert_eq!(
        field(&report, "Type: "),
        vec!["deposit", "transfer", "withdrawal", "deposit"]
    );
    assert_eq!(field(&report, "Transaction ID: "), vec!["1", "2", "1", "2"]);
    assert_eq!(field(&report, "Counterparty: "), vec!["2", "1"]);
    assert_eq!(field(&report, "Timestamp: ").len(), 4);
}

#[test]
fn oversized_amounts_are_rejected() {
    let script = "type,customer,account,to,amount\n\
                  open,1,,,79228162514264337593543950335\n\
                  open,2,,,1\n\
                  deposit,,1,,1\n\
                  transfer,,2,1,1\n";
    let (report, errors) = run_script(script);

    assert_eq!(errors.len(), 2);
    for err in &errors {
        assert!(matches!(
            err,
            ScriptError::Ledger(LedgerError::Account(AccountError::BalanceOverflow {
                account_id: 1,
                ..
            }))
        ));
    }
    assert_eq!(
        field(&report, "Balance: "),
        vec!["79228162514264337593543950335", "1"]
    );
    assert!(!report.contains("Transaction ID:"));
}

#[test]
fn malformed_row_aborts_run() {
    let mut output = Vec::new();
    let service = Service {
        input: "type,customer,account,to,amount\nopen,1,,,abc\n".as_bytes(),
        output: &mut output,
        error_printer: Box::new(|_: u64, _: ScriptError| {}),
    };
    let err = service.run().unwrap_err();
    assert!(err.to_string().contains("Malformed script row"));
    assert!(output.is_empty());
}
