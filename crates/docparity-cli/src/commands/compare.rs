//! Parity comparison command

use clap::Args;
use docparity_core::config::{ConfigOverlay, ExitStrategy, RunConfig};
use docparity_core::exit::error_exit_code;
use docparity_core::report::{write_json_report, write_summary, Reporter};
use docparity_core::{ParityError, ParityRunner, ProductProfile};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Directory of reference (internally collected) `<doc_type>.json` files
    pub reference_dir: PathBuf,

    /// Directory of candidate (Metricbeat collected) `<doc_type>.json` files
    pub candidate_dir: PathBuf,

    /// Product profile: elasticsearch, logstash, kibana, beats or generic
    #[arg(long)]
    pub profile: Option<ProductProfile>,

    /// Display name of the reference collection path
    #[arg(long)]
    pub reference_name: Option<String>,

    /// Display name of the candidate collection path
    #[arg(long)]
    pub candidate_name: Option<String>,

    /// Additional dotted path the candidate may insert (repeatable)
    #[arg(long = "allow-insert", value_name = "PATH")]
    pub allow_insert: Vec<String>,

    /// Additional dotted path the candidate may delete (repeatable)
    #[arg(long = "allow-delete", value_name = "PATH")]
    pub allow_delete: Vec<String>,

    /// TOML configuration overlay
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Exit with a fixed code on violations instead of 100 + count (`--fixed-exit-code=CODE`)
    #[arg(
        long,
        value_name = "CODE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "21"
    )]
    pub fixed_exit_code: Option<u8>,

    /// Write a JSON run report
    #[arg(long, value_name = "FILE")]
    pub report_json: Option<PathBuf>,

    /// Write a Markdown summary
    #[arg(long, value_name = "FILE")]
    pub summary_md: Option<PathBuf>,
}

impl CompareArgs {
    /// Resolve the run configuration: profile, then overlay, then flags
    fn run_config(&self) -> Result<RunConfig, ParityError> {
        let overlay = self.config.as_deref().map(ConfigOverlay::load).transpose()?;

        let profile = self
            .profile
            .or_else(|| overlay.as_ref().and_then(|o| o.profile))
            .unwrap_or_default();

        let mut config = RunConfig::new(profile);
        if let Some(overlay) = overlay {
            config = config.with_overlay(overlay);
        }
        if let Some(name) = &self.reference_name {
            config.reference_role = name.clone();
        }
        if let Some(name) = &self.candidate_name {
            config.candidate_role = name.clone();
        }
        config = config
            .with_allowed_insertions(self.allow_insert.iter().cloned())
            .with_allowed_deletions(self.allow_delete.iter().cloned());
        if let Some(code) = self.fixed_exit_code {
            config = config.with_exit_strategy(ExitStrategy::Fixed(code));
        }

        tracing::debug!(
            profile = config.profile.name(),
            reference_role = config.reference_role.as_str(),
            candidate_role = config.candidate_role.as_str(),
            "resolved run configuration"
        );
        Ok(config)
    }
}

/// Run the comparison and return the process exit code
pub fn execute(args: CompareArgs) -> i32 {
    match execute_compare(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            error_exit_code(&e, &args.reference_dir)
        }
    }
}

fn execute_compare(args: &CompareArgs) -> Result<i32, ParityError> {
    let config = args.run_config()?;
    let runner = ParityRunner::new(config)?;
    let report = runner.run(&args.reference_dir, &args.candidate_dir)?;

    Reporter::stdio(&report.reference_role, &report.candidate_role)
        .report_run(&report)
        .map_err(|e| ParityError::io("<stdout>", &e))?;

    if let Some(path) = &args.report_json {
        write_json_report(&report, path)?;
    }
    if let Some(path) = &args.summary_md {
        write_summary(&report, path)?;
    }

    Ok(report.exit_code())
}
