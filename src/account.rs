use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::transaction::{AccountId, CustomerId, Transaction, TransactionId, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    Deposit,
    Withdraw,
    TransferOut,
}

/// Validated balance change, ready to be applied to the account it names.
///
/// Applying an event consumes it, so each event lands at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct AccountEvent {
    account_id: AccountId,
    transaction_id: TransactionId,
    amount: Decimal,
    kind: TransactionKind,
    counterparty: Option<AccountId>,
}

impl AccountEvent {
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }
}

/// Both halves of a transfer. Produced only when both sides are valid.
#[derive(Debug)]
pub struct TransferEvents {
    pub outgoing: AccountEvent,
    pub incoming: AccountEvent,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Amount must be positive for {action:?}, got {amount}")]
    NonPositiveAmount {
        action: AccountAction,
        amount: Decimal,
    },
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Initial balance must not be negative, got {0}")]
    NegativeInitialBalance(Decimal),
    #[error("Crediting {amount} to account {account_id} would overflow its balance of {balance}")]
    BalanceOverflow {
        account_id: AccountId,
        balance: Decimal,
        amount: Decimal,
    },
    #[error("Account {0} cannot record any more transactions")]
    HistoryExhausted(AccountId),
}

#[derive(Debug)]
pub struct Account {
    id: AccountId,
    customer_id: CustomerId,
    initial_balance: Decimal,
    balance: Decimal,
    transactions: Vec<Transaction>,
}

impl Account {
    pub fn open(
        id: AccountId,
        customer_id: CustomerId,
        initial_balance: Decimal,
    ) -> Result<Self, AccountError> {
        if initial_balance < Decimal::ZERO {
            return Err(AccountError::NegativeInitialBalance(initial_balance));
        }
        Ok(Self {
            id,
            customer_id,
            initial_balance,
            balance: initial_balance,
            transactions: Vec::new(),
        })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn initial_balance(&self) -> Decimal {
        self.initial_balance
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// History in the order the records were appended.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn details(&self) -> AccountDetails<'_> {
        AccountDetails { account: self }
    }

    pub fn handle_deposit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        ensure_positive(AccountAction::Deposit, amount)?;
        self.ensure_credit(amount)?;
        self.event(amount, TransactionKind::Deposit, None)
    }

    pub fn handle_withdraw(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        ensure_positive(AccountAction::Withdraw, amount)?;
        self.ensure_funds(amount)?;
        self.event(amount, TransactionKind::Withdrawal, None)
    }

    pub fn handle_transfer(
        &self,
        amount: Decimal,
        target: &Account,
    ) -> Result<TransferEvents, AccountError> {
        ensure_positive(AccountAction::TransferOut, amount)?;
        self.ensure_funds(amount)?;
        target.ensure_credit(amount)?;
        Ok(TransferEvents {
            outgoing: self.event(amount, TransactionKind::TransferOut, Some(target.id))?,
            incoming: target.event(amount, TransactionKind::Deposit, Some(self.id))?,
        })
    }

    /// Applies a previously handled event: updates the balance and appends the
    /// matching record. No validation happens here.
    pub(crate) fn apply(&mut self, event: AccountEvent) -> &Transaction {
        debug_assert_eq!(event.account_id, self.id);
        debug_assert_eq!(
            next_transaction_id(self.transactions.len()),
            Some(event.transaction_id)
        );
        match event.kind {
            TransactionKind::Deposit => self.balance += event.amount,
            TransactionKind::Withdrawal | TransactionKind::TransferOut => {
                self.balance -= event.amount
            }
        }
        self.transactions.push(Transaction::new(
            event.transaction_id,
            self.id,
            event.amount,
            event.kind,
            event.counterparty,
        ));
        &self.transactions[self.transactions.len() - 1]
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<&Transaction, AccountError> {
        let event = self.handle_deposit(amount)?;
        Ok(self.apply(event))
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<&Transaction, AccountError> {
        let event = self.handle_withdraw(amount)?;
        Ok(self.apply(event))
    }

    pub fn transfer(&mut self, amount: Decimal, target: &mut Account) -> Result<(), AccountError> {
        let events = self.handle_transfer(amount, target)?;
        self.apply(events.outgoing);
        target.apply(events.incoming);
        Ok(())
    }

    fn ensure_funds(&self, amount: Decimal) -> Result<(), AccountError> {
        if self.balance >= amount {
            Ok(())
        } else {
            Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            })
        }
    }

    fn ensure_credit(&self, amount: Decimal) -> Result<(), AccountError> {
        match self.balance.checked_add(amount) {
            Some(_) => Ok(()),
            None => Err(AccountError::BalanceOverflow {
                account_id: self.id,
                balance: self.balance,
                amount,
            }),
        }
    }

    fn event(
        &self,
        amount: Decimal,
        kind: TransactionKind,
        counterparty: Option<AccountId>,
    ) -> Result<AccountEvent, AccountError> {
        let transaction_id = next_transaction_id(self.transactions.len())
            .ok_or(AccountError::HistoryExhausted(self.id))?;
        Ok(AccountEvent {
            account_id: self.id,
            transaction_id,
            amount,
            kind,
            counterparty,
        })
    }
}

fn ensure_positive(action: AccountAction, amount: Decimal) -> Result<(), AccountError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(AccountError::NonPositiveAmount { action, amount })
    }
}

/// Sequence number for the record appended after `recorded` existing ones.
fn next_transaction_id(recorded: usize) -> Option<TransactionId> {
    TransactionId::try_from(recorded).ok()?.checked_add(1)
}

/// Human-readable report of an account's balance and full history.
pub struct AccountDetails<'a> {
    account: &'a Account,
}

impl fmt::Display for AccountDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Account ID: {}", self.account.id)?;
        writeln!(f, "Customer ID: {}", self.account.customer_id)?;
        writeln!(f, "Balance: {}", self.account.balance)?;
        writeln!(f, "Transaction History:")?;
        for (i, tx) in self.account.transactions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{tx}")?;
        }
        Ok(())
    }
}
