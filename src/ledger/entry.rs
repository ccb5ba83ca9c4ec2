use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Deposit,
    Withdrawal,
    TransferOut,
    TransferIn,
    LoanPayment,
}

impl EntryKind {
    /// Whether entries of this kind add to the account balance.
    pub fn is_credit(&self) -> bool {
        matches!(self, EntryKind::Deposit | EntryKind::TransferIn)
    }
}

/// One balance-affecting event. Entries are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub description: String,
}

impl LedgerEntry {
    pub fn new(
        kind: EntryKind,
        amount: Decimal,
        timestamp: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            kind,
            amount,
            description: description.into(),
        }
    }

    /// The amount with the sign of its effect on the balance.
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }
}
