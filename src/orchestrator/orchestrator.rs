use std::error::Error;
use std::fs::File;
use std::io::{self, Read, Write};

use csv::ReaderBuilder;
use log::info;

use crate::engine::BankEngine;
use crate::registry::{demo_bank, Bank};
use crate::transactions::CommandRecord;

/// Replay a command file against the demo bank and print the account summary.
pub fn run(filename: &str) -> Result<(), Box<dyn Error>> {
    let file = File::open(filename)?;
    let engine = run_with(demo_bank(), file)?;
    engine.output_accounts(io::stdout())?;
    Ok(())
}

/// Apply every command read from `reader` to `bank`. Rows that fail a
/// banking rule are logged and skipped; malformed CSV aborts the run.
pub fn run_with<R: Read>(bank: Bank, reader: R) -> Result<BankEngine, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut engine = BankEngine::new(bank);

    let mut processed = 0usize;
    for result in rdr.deserialize() {
        let record: CommandRecord = result?;
        engine.process_record(record);
        processed += 1;
    }

    info!("processed {} command(s)", processed);
    Ok(engine)
}

/// Writes the ledger of `number` after replaying commands; used for audits.
pub fn history_after<R: Read, W: Write>(
    bank: Bank,
    reader: R,
    number: &str,
    writer: W,
) -> Result<(), Box<dyn Error>> {
    let engine = run_with(bank, reader)?;
    engine.output_history(number, writer)
}
