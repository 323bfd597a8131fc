//! mongodiff CLI
//!
//! Snapshots a MongoDB database, waits while the operator inserts data,
//! snapshots again and writes scripts that replay or remove the new
//! documents.

use clap::Parser;

mod args;
mod run;
mod wait;

fn main() {
    let cli = args::Cli::parse();

    if let Err(e) = run::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
