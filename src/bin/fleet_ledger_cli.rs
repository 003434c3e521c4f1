use std::process;

use fleet_ledger::{cli::run_cli, init};

fn main() {
    init();

    if let Err(err) = run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
