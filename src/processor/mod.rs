use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountDetails, AccountError},
    command::LedgerCommand,
    transaction::{AccountId, CustomerId, Transaction},
};

pub mod in_memory_ledger;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),
    #[error("Cannot transfer from account {0} to itself")]
    SameAccount(AccountId),
    #[error("No account ids left to assign")]
    AccountIdsExhausted,
    #[error(transparent)]
    Account(#[from] AccountError),
}

/// Records left on both accounts by a successful transfer.
#[derive(Debug, Clone)]
pub struct TransferRecords {
    pub outgoing: Transaction,
    pub incoming: Transaction,
}

#[derive(Debug, Clone)]
pub enum CommandOutcome {
    Opened(AccountId),
    Recorded(Transaction),
    Transferred(TransferRecords),
}

/// Registry of accounts. Resolves account ids and routes operations to them.
///
/// Every failed operation leaves the ledger unchanged.
pub trait Ledger {
    fn open_account(
        &mut self,
        customer_id: CustomerId,
        initial_balance: Decimal,
    ) -> Result<AccountId, LedgerError>;

    fn deposit(
        &mut self,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError>;

    fn withdraw(
        &mut self,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError>;

    /// Moves `amount` between two distinct accounts. Both sides are validated
    /// before either is changed.
    fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<TransferRecords, LedgerError>;

    fn account(&self, account_id: AccountId) -> Result<&Account, LedgerError>;

    fn balance(&self, account_id: AccountId) -> Result<Decimal, LedgerError> {
        Ok(self.account(account_id)?.balance())
    }

    fn history(&self, account_id: AccountId) -> Result<&[Transaction], LedgerError> {
        Ok(self.account(account_id)?.transactions())
    }

    fn account_details(&self, account_id: AccountId) -> Result<AccountDetails<'_>, LedgerError> {
        Ok(self.account(account_id)?.details())
    }

    fn execute(&mut self, command: LedgerCommand) -> Result<CommandOutcome, LedgerError> {
        match command {
            LedgerCommand::OpenAccount {
                customer_id,
                initial_balance,
            } => self
                .open_account(customer_id, initial_balance)
                .map(CommandOutcome::Opened),
            LedgerCommand::Deposit { account_id, amount } => self
                .deposit(account_id, amount)
                .map(CommandOutcome::Recorded),
            LedgerCommand::Withdraw { account_id, amount } => self
                .withdraw(account_id, amount)
                .map(CommandOutcome::Recorded),
            LedgerCommand::Transfer { from, to, amount } => self
                .transfer(from, to, amount)
                .map(CommandOutcome::Transferred),
        }
    }
}
