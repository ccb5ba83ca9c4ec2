pub mod accounts;
pub mod customers;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod orchestrator;
pub mod registry;
pub mod transactions;

pub use accounts::{Account, AccountKind};
pub use customers::Customer;
pub use engine::BankEngine;
pub use error::{BankError, BankResult};
pub use ledger::{EntryKind, LedgerEntry};
pub use orchestrator::{run, transfer, TransferReceipt};
pub use registry::Bank;
