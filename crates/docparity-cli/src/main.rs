//! docparity CLI
//!
//! Compares internally collected monitoring documents with Metricbeat
//! collected ones and reports parity per document type.

use clap::error::ErrorKind;
use clap::Parser;
use docparity_core::exit::{EXIT_SUCCESS, EXIT_USAGE};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "docparity", version)]
#[command(
    about = "Check monitoring document parity between two collection paths",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    compare: commands::compare::CompareArgs,

    #[command(flatten)]
    logging: commands::logging::LoggingArgs,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
                _ => EXIT_USAGE,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    commands::logging::init(&cli.logging);
    std::process::exit(commands::compare::execute(cli.compare));
}
