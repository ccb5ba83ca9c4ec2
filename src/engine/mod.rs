pub mod engine;

pub use engine::BankEngine;
