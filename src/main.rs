mod cli;
mod generate;
mod logging;

use std::process;

use clap::Parser;
use eot_table::TableConfig;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = generate::run(&TableConfig::default()) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
