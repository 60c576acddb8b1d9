/// Immutable records of completed balance changes.
pub mod transaction;

/// Single account state: balance plus append-only history.
/// State is modified using events, which are created by handling operations,
/// so a rejected operation never touches the account.
pub mod account;

/// Script-level commands, checked for required fields before reaching a ledger.
pub mod command;

/// Ledger interface, plus "in memory" implementation.
/// Owns all accounts, assigns their ids and routes operations to them.
pub mod processor;

/// Bootstraps a ledger from an operation script. Kept in the library so the
/// integration test can run it.
pub mod bin_utils;
