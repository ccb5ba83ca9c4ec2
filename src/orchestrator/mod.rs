pub mod orchestrator;
pub mod transfer;

pub use orchestrator::{history_after, run, run_with};
pub use transfer::{transfer, TransferReceipt};
