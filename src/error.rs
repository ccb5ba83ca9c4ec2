use rust_decimal::Decimal;
use thiserror::Error;

/// Every failure the ledger can report. All of them are recoverable:
/// the caller decides whether to retry, adjust the amount or give up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("Invalid amount: {0} (must be positive)")]
    InvalidAmount(Decimal),

    #[error("Insufficient funds in {account}: requested {requested}, available {available}")]
    InsufficientFunds {
        account: String,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Overdraft limit exceeded on {account}: requested {requested}, balance {balance}, limit {limit}")]
    OverdraftExceeded {
        account: String,
        requested: Decimal,
        balance: Decimal,
        limit: Decimal,
    },

    #[error("Operation '{operation}' is not supported on {account}")]
    UnsupportedOperation {
        account: String,
        operation: &'static str,
    },

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Cannot transfer from {0} to itself")]
    SameAccount(String),

    #[error("Authentication failed for user {0}")]
    AuthenticationFailure(String),

    #[error("Missing field '{field}' for {command} command")]
    MissingField {
        command: &'static str,
        field: &'static str,
    },
}

pub type BankResult<T> = Result<T, BankError>;

impl BankError {
    /// True when the request was well-formed but the account cannot cover it,
    /// so a smaller amount might succeed.
    pub fn is_funds_error(&self) -> bool {
        matches!(
            self,
            BankError::InsufficientFunds { .. } | BankError::OverdraftExceeded { .. }
        )
    }
}
