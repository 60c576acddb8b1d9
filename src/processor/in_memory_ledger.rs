use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{
    account::Account,
    transaction::{AccountId, CustomerId, Transaction},
};

use super::{Ledger, LedgerError, TransferRecords};

pub struct InMemoryLedger {
    accounts: BTreeMap<AccountId, Account>,
    next_account_id: AccountId,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self {
            accounts: BTreeMap::new(),
            next_account_id: 1,
        }
    }
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All accounts, ordered by id.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn account_mut(&mut self, account_id: AccountId) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(&account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))
    }
}

impl Ledger for InMemoryLedger {
    fn open_account(
        &mut self,
        customer_id: CustomerId,
        initial_balance: Decimal,
    ) -> Result<AccountId, LedgerError> {
        let account_id = self.next_account_id;
        let next_account_id = account_id
            .checked_add(1)
            .ok_or(LedgerError::AccountIdsExhausted)?;
        let account = Account::open(account_id, customer_id, initial_balance)?;
        // ids are only consumed by accounts that actually got opened
        self.next_account_id = next_account_id;
        self.accounts.insert(account_id, account);
        info!(account_id, customer_id, %initial_balance, "account opened");
        Ok(account_id)
    }

    fn deposit(
        &mut self,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        let tx = self.account_mut(account_id)?.deposit(amount)?.clone();
        debug!(account_id, %amount, tx_id = tx.id(), "deposit applied");
        Ok(tx)
    }

    fn withdraw(
        &mut self,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        let tx = self.account_mut(account_id)?.withdraw(amount)?.clone();
        debug!(account_id, %amount, tx_id = tx.id(), "withdrawal applied");
        Ok(tx)
    }

    fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<TransferRecords, LedgerError> {
        let source = self.account(from)?;
        let target = self.account(to)?;
        if from == to {
            return Err(LedgerError::SameAccount(from));
        }
        let events = source.handle_transfer(amount, target)?;

        let outgoing = self.account_mut(from)?.apply(events.outgoing).clone();
        let incoming = self.account_mut(to)?.apply(events.incoming).clone();
        debug!(from, to, %amount, "transfer applied");
        Ok(TransferRecords { outgoing, incoming })
    }

    fn account(&self, account_id: AccountId) -> Result<&Account, LedgerError> {
        self.accounts
            .get(&account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))
    }
}
