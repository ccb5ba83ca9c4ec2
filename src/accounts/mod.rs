pub mod account;

pub use account::{Account, AccountKind, MONTHLY_PAYMENT_RATE};
