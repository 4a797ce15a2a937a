use anyhow::{Context, Result};
use chrono::Local;
use tracing::debug;

use ticket_cli::pipeline::{ReportRequest, run_report};
use ticket_model::{ReportConfig, RunOutcome};

use crate::cli::Cli;

/// Resolve the configuration from the command line and an optional TOML file.
fn load_config(cli: &Cli) -> Result<ReportConfig> {
    let mut config = match &cli.config {
        Some(path) => ReportConfig::from_toml_file(path)
            .with_context(|| format!("load configuration {}", path.display()))?,
        None => ReportConfig::default(),
    };
    if let Some(dir) = &cli.output_dir {
        config = config.with_output_dir(dir);
    }
    debug!(?config, "configuration resolved");
    Ok(config)
}

pub fn run(cli: &Cli) -> Result<RunOutcome> {
    let config = load_config(cli)?;
    let request = ReportRequest::new(&cli.export, config, Local::now().date_naive());
    let outcome = run_report(&request)
        .with_context(|| format!("process {}", request.export.display()))?;
    Ok(outcome)
}
