//! Logging flags

use clap::{Args, ValueEnum};
use docparity_core::logging_facility::{init_with_filter, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per line, for CI log collection
    Json,
}

#[derive(Debug, Args)]
pub struct LoggingArgs {
    /// Diagnostic log format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Increase diagnostic verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl LoggingArgs {
    /// Filter used when `RUST_LOG` is not set
    pub fn filter(&self) -> &'static str {
        match self.verbose {
            0 => "docparity=warn",
            1 => "docparity=info",
            2 => "docparity=debug",
            _ => "docparity=trace",
        }
    }
}

pub fn init(args: &LoggingArgs) {
    let profile = match args.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    };
    init_with_filter(profile, args.filter());
}
