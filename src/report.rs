//! End-to-end report run
//!
//! Validated options → maintenance fetch → per-zone server join → writer.

use std::io::Write;

use crate::api::SacloudClient;
use crate::error::Result;
use crate::join::join_scheduled_servers;
use crate::output::{write_report, OutputFormat};
use crate::utils::check_date_format;

/// Options of one report run, with dates already checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    start_at: String,
    end_at: String,
    pub format: OutputFormat,
    pub indent: bool,
}

impl ReportOptions {
    /// Validate the date range and build the options
    ///
    /// Empty dates leave that side of the range open.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDateFormat` for a date that is not `yyyy-mm-dd`
    pub fn new(
        start_at: impl Into<String>,
        end_at: impl Into<String>,
        format: OutputFormat,
        indent: bool,
    ) -> Result<Self> {
        let start_at = start_at.into();
        let end_at = end_at.into();
        check_date_format(&start_at)?;
        check_date_format(&end_at)?;

        Ok(Self {
            start_at,
            end_at,
            format,
            indent,
        })
    }

    pub fn start_at(&self) -> &str {
        &self.start_at
    }

    pub fn end_at(&self) -> &str {
        &self.end_at
    }
}

/// Fetch, join and write the report; returns the number of rows written
///
/// # Errors
///
/// Returns the first fetch, decode, join or write error; nothing is retried
pub async fn generate_report<W: Write>(
    client: &SacloudClient,
    options: &ReportOptions,
    out: W,
) -> Result<usize> {
    let maintenances = client
        .fetch_maintenances(options.start_at(), options.end_at())
        .await?;

    let rows = join_scheduled_servers(&maintenances, client).await?;
    tracing::info!(rows = rows.len(), format = %options.format, "Writing report");

    write_report(out, options.format, options.indent, &rows)?;
    Ok(rows.len())
}
