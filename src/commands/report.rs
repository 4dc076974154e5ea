use anyhow::{Context, Result};
use std::path::PathBuf;

use mainte_servers::api::SacloudClient;
use mainte_servers::config::Config;
use mainte_servers::output::OutputFormat;
use mainte_servers::profile::ProfileResolver;
use mainte_servers::report::{generate_report, ReportOptions};

/// Flags of the report command
pub struct ReportParams {
    pub profile: String,
    pub start: String,
    pub end: String,
    pub format: OutputFormat,
    pub indent: bool,
    pub config: Option<PathBuf>,
    pub timeout: Option<u64>,
}

pub async fn report(params: ReportParams) -> Result<()> {
    // Dates are checked before credentials or the network are touched
    let options = ReportOptions::new(params.start, params.end, params.format, params.indent)?;

    let mut config = match &params.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(timeout) = params.timeout {
        config.request_timeout_secs = Some(timeout);
    }
    config.validate().context("Invalid configuration")?;

    let profile = ProfileResolver::from_env()?
        .resolve(&params.profile)
        .context("Failed to resolve credential profile")?;
    tracing::debug!(profile = %profile.name, "Using profile");

    let client = SacloudClient::new(&config, profile).context("Failed to create HTTP client")?;

    let stdout = std::io::stdout();
    let rows = generate_report(&client, &options, stdout.lock()).await?;
    tracing::info!(rows, "Report complete");

    Ok(())
}
