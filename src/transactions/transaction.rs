use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    Deposit,
    Withdrawal,
    Transfer,
    Interest,
    LoanPayment,
}

impl CommandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Deposit => "deposit",
            CommandType::Withdrawal => "withdrawal",
            CommandType::Transfer => "transfer",
            CommandType::Interest => "interest",
            CommandType::LoanPayment => "loan_payment",
        }
    }
}

/// One row of a command file: `type,account,counterparty,amount`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRecord {
    #[serde(rename = "type")]
    pub command: CommandType,
    pub account: String,
    pub counterparty: Option<String>,
    pub amount: Option<Decimal>,
}
