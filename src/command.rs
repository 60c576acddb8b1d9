use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::transaction::{AccountId, CustomerId};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Open,
    Deposit,
    Withdraw,
    Transfer,
}

/// Ledger operation with every required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    OpenAccount {
        customer_id: CustomerId,
        initial_balance: Decimal,
    },
    Deposit {
        account_id: AccountId,
        amount: Decimal,
    },
    Withdraw {
        account_id: AccountId,
        amount: Decimal,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Customer is required for {kind:?}")]
    CustomerRequired { kind: OperationKind },
    #[error("Account is required for {kind:?}")]
    AccountRequired { kind: OperationKind },
    #[error("Target account is required for Transfer")]
    TargetRequired,
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
}

impl LedgerCommand {
    /// Builds a command from the loosely typed columns of a script row.
    ///
    /// Only presence is checked here; amount rules belong to
    /// [`crate::account::Account`].
    pub fn parse_command(
        kind: OperationKind,
        customer: Option<CustomerId>,
        account: Option<AccountId>,
        to: Option<AccountId>,
        amount: Option<Decimal>,
    ) -> Result<Self, CommandError> {
        let amount = amount.ok_or(CommandError::AmountRequired { kind })?;
        match kind {
            OperationKind::Open => Ok(Self::OpenAccount {
                customer_id: customer.ok_or(CommandError::CustomerRequired { kind })?,
                initial_balance: amount,
            }),
            OperationKind::Deposit => Ok(Self::Deposit {
                account_id: account.ok_or(CommandError::AccountRequired { kind })?,
                amount,
            }),
            OperationKind::Withdraw => Ok(Self::Withdraw {
                account_id: account.ok_or(CommandError::AccountRequired { kind })?,
                amount,
            }),
            OperationKind::Transfer => Ok(Self::Transfer {
                from: account.ok_or(CommandError::AccountRequired { kind })?,
                to: to.ok_or(CommandError::TargetRequired)?,
                amount,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::FromPrimitive;

    use super::*;

    #[test]
    fn parse_valid_commands() {
        let amount = Some(Decimal::from_u32(10).unwrap());
        assert_eq!(
            LedgerCommand::parse_command(OperationKind::Open, Some(3), None, None, amount),
            Ok(LedgerCommand::OpenAccount {
                customer_id: 3,
                initial_balance: Decimal::from_u32(10).unwrap()
            })
        );
        assert_eq!(
            LedgerCommand::parse_command(OperationKind::Withdraw, None, Some(2), None, amount),
            Ok(LedgerCommand::Withdraw {
                account_id: 2,
                amount: Decimal::from_u32(10).unwrap()
            })
        );
        // extra columns are ignored
        assert_eq!(
            LedgerCommand::parse_command(OperationKind::Deposit, Some(9), Some(1), Some(4), amount),
            Ok(LedgerCommand::Deposit {
                account_id: 1,
                amount: Decimal::from_u32(10).unwrap()
            })
        );
        assert_eq!(
            LedgerCommand::parse_command(OperationKind::Transfer, None, Some(1), Some(2), amount),
            Ok(LedgerCommand::Transfer {
                from: 1,
                to: 2,
                amount: Decimal::from_u32(10).unwrap()
            })
        );
    }

    #[test]
    fn parse_missing_columns() {
        let amount = Some(Decimal::from_u32(10).unwrap());
        let err =
            LedgerCommand::parse_command(OperationKind::Deposit, None, Some(1), None, None)
                .unwrap_err();
        assert_eq!(err, CommandError::AmountRequired {
            kind: OperationKind::Deposit
        });
        assert_eq!(err.to_string(), "Amount is required for Deposit");

        let err = LedgerCommand::parse_command(OperationKind::Open, None, Some(1), None, amount)
            .unwrap_err();
        assert_eq!(err, CommandError::CustomerRequired {
            kind: OperationKind::Open
        });

        let err =
            LedgerCommand::parse_command(OperationKind::Transfer, None, None, Some(2), amount)
                .unwrap_err();
        assert_eq!(err.to_string(), "Account is required for Transfer");

        let err =
            LedgerCommand::parse_command(OperationKind::Transfer, None, Some(1), None, amount)
                .unwrap_err();
        assert_eq!(err, CommandError::TargetRequired);
    }
}
