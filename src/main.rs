use std::env;
use std::process;

use bank_ledger::run;
use log::info;

fn main() {
    // Expecting exactly one argument: the CSV file of banking commands
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <commands.csv>", args[0]);
        process::exit(1);
    }
    let filename = &args[1];
    // Initialize logger (respect RUST_LOG env var if set)
    env_logger::init();

    info!("starting bank ledger with file: {}", filename);

    if let Err(e) = run(filename) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
