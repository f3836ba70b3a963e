use std::io;
use std::process;

use clap::Parser;

use crate::config::Args;
use crate::console::Console;
use crate::store::TransactionStore;

mod config;
mod console;
mod csv_handler;
mod error;
mod store;
mod transaction;

fn main() {
    env_logger::init();
    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> error::Result<()> {
    let mut store = TransactionStore::open(args.into_store_config()?)?;
    log::info!("Opened {} ({})", store.path().display(), store);
    Console::new(io::stdin().lock(), io::stdout().lock(), &mut store).run()
}
