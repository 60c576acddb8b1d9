use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub type TransactionId = u32;
pub type AccountId = u32;
pub type CustomerId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    #[serde(rename = "transfer")]
    TransferOut,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::TransferOut => "transfer",
        };
        f.write_str(name)
    }
}

/// Record of one completed balance change.
///
/// Created when an account applies a validated event and never modified afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    id: TransactionId,
    account_id: AccountId,
    amount: Decimal,
    kind: TransactionKind,
    counterparty: Option<AccountId>,
    created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        account_id: AccountId,
        amount: Decimal,
        kind: TransactionKind,
        counterparty: Option<AccountId>,
    ) -> Self {
        Self {
            id,
            account_id,
            amount,
            kind,
            counterparty,
            created_at: Utc::now(),
        }
    }

    /// Sequence number within the owning account, starting at 1.
    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// The other side of a transfer, if this record was produced by one.
    pub fn counterparty(&self) -> Option<AccountId> {
        self.counterparty
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transaction ID: {}", self.id)?;
        writeln!(f, "Account ID: {}", self.account_id)?;
        writeln!(f, "Amount: {}", self.amount)?;
        writeln!(f, "Type: {}", self.kind)?;
        if let Some(counterparty) = self.counterparty {
            writeln!(f, "Counterparty: {counterparty}")?;
        }
        write!(
            f,
            "Timestamp: {}",
            self.created_at.format("%a %b %e %H:%M:%S %Y UTC")
        )
    }
}
