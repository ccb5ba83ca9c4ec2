pub mod bank;
pub mod seed;

pub use bank::Bank;
pub use seed::demo_bank;
