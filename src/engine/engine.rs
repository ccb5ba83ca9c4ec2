use std::error::Error;
use std::io::Write;

use csv::Writer;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::error::{BankError, BankResult};
use crate::orchestrator::transfer;
use crate::registry::Bank;
use crate::transactions::{CommandRecord, CommandType};

pub struct BankEngine {
    pub bank: Bank,
}

impl BankEngine {
    pub fn new(bank: Bank) -> Self {
        Self { bank }
    }

    /// Process a single command. A failed command changes nothing and is
    /// logged; the engine keeps going.
    pub fn process_record(&mut self, record: CommandRecord) {
        let command = record.command;
        let account = record.account.clone();
        match self.apply(record) {
            Ok(()) => debug!("{} on {} applied", command.as_str(), account),
            Err(e) => warn!("{} on {} rejected: {}", command.as_str(), account, e),
        }
    }

    pub fn apply(&mut self, record: CommandRecord) -> BankResult<()> {
        let command = record.command;
        match command {
            CommandType::Deposit => {
                let amount = required_amount(command, record.amount)?;
                self.bank.account_mut(&record.account)?.deposit(amount)
            }
            CommandType::Withdrawal => {
                let amount = required_amount(command, record.amount)?;
                self.bank.account_mut(&record.account)?.withdraw(amount)
            }
            CommandType::Transfer => {
                let amount = required_amount(command, record.amount)?;
                let to = record.counterparty.ok_or(BankError::MissingField {
                    command: command.as_str(),
                    field: "counterparty",
                })?;
                transfer(&mut self.bank, &record.account, &to, amount).map(|_| ())
            }
            CommandType::Interest => self
                .bank
                .account_mut(&record.account)?
                .apply_interest()
                .map(|_| ()),
            CommandType::LoanPayment => self
                .bank
                .account_mut(&record.account)?
                .process_monthly_payment()
                .map(|_| ()),
        }
    }

    /// Write a summary of every account in CSV format
    pub fn output_accounts<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = Writer::from_writer(writer);
        wtr.write_record(["account", "kind", "holder", "balance", "principal"])?;

        for account in self.bank.accounts() {
            wtr.serialize((
                account.number(),
                account.kind().name(),
                account.holder(),
                account.current_balance().round_dp(2),
                account.principal().map(|p| p.round_dp(2)),
            ))?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Write the ledger of one account in CSV format, oldest entry first.
    pub fn output_history<W: Write>(&self, number: &str, writer: W) -> Result<(), Box<dyn Error>> {
        let account = self.bank.account(number)?;
        let mut wtr = Writer::from_writer(writer);
        for entry in account.ledger_history() {
            wtr.serialize(entry)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn required_amount(command: CommandType, amount: Option<Decimal>) -> BankResult<Decimal> {
    amount.ok_or(BankError::MissingField {
        command: command.as_str(),
        field: "amount",
    })
}
