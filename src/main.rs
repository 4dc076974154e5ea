use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mainte_servers::output::OutputFormat;

mod commands;

#[derive(Parser)]
#[command(
    name = "mainte-servers",
    version,
    about = "List SAKURA Cloud servers scheduled for host maintenance",
    long_about = None
)]
struct Cli {
    /// usacloud profile name (empty for the current profile)
    #[arg(long, default_value = "")]
    profile: String,

    /// Target maintenance start date in yyyy-mm-dd format
    #[arg(long, default_value = "")]
    start: String,

    /// Target maintenance end date in yyyy-mm-dd format
    #[arg(long, default_value = "")]
    end: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Enable indent for json output
    #[arg(long, default_value = "false")]
    indent: bool,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, default_value = "text")]
    log_format: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    setup_tracing(&cli.log_format, cli.verbose)?;

    tracing::debug!(
        profile = %cli.profile,
        start = %cli.start,
        end = %cli.end,
        format = %cli.format,
        indent = %cli.indent,
        "Starting maintenance report"
    );

    commands::report(commands::ReportParams {
        profile: cli.profile,
        start: cli.start,
        end: cli.end,
        format: cli.format,
        indent: cli.indent,
        config: cli.config,
        timeout: cli.timeout,
    })
    .await
    .inspect_err(|err| {
        match err.downcast_ref::<mainte_servers::error::Error>() {
            Some(e) => tracing::debug!(
                category = e.category().as_str(),
                fatal = e.is_fatal(),
                "Report failed"
            ),
            None => tracing::debug!(category = "other", "Report failed"),
        }
    })
}

/// Logs go to stderr; stdout carries only the report
fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("mainte_servers=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("mainte_servers=warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        "text" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        other => anyhow::bail!("log format must be text or json, got {other:?}"),
    }

    Ok(())
}
