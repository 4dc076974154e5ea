//! Report writers
//!
//! Rows are written in one pass to any `std::io::Write`. Output is not
//! atomic; a failing stream may leave a partial report behind.

use std::fmt;
use std::io::{BufWriter, Write};

use crate::models::MainteScheduledServer;
use crate::utils::error::WriteError;

/// Supported report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a header line
    #[default]
    Csv,
    /// Tab-separated values with a header line
    Tsv,
    /// Labeled tab-separated values, one record per line
    Ltsv,
    /// One JSON array
    Json,
}

impl OutputFormat {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Ltsv => "ltsv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write `rows` to `out` in the given format
///
/// `indent` only affects JSON output.
///
/// # Errors
///
/// Returns a `WriteError` if encoding or the underlying stream fails
pub fn write_report<W: Write>(
    out: W,
    format: OutputFormat,
    indent: bool,
    rows: &[MainteScheduledServer],
) -> Result<(), WriteError> {
    match format {
        OutputFormat::Csv => write_delimited(out, b',', rows),
        OutputFormat::Tsv => write_delimited(out, b'\t', rows),
        OutputFormat::Ltsv => write_ltsv(out, rows),
        OutputFormat::Json => write_json(out, indent, rows),
    }
}

/// Header line followed by one record per row
pub fn write_delimited<W: Write>(
    out: W,
    delimiter: u8,
    rows: &[MainteScheduledServer],
) -> Result<(), WriteError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(MainteScheduledServer::COLUMNS)?;
    for row in rows {
        writer.write_record(row.values())?;
    }
    writer.flush()?;

    Ok(())
}

/// One `label:value` line per row, no header
pub fn write_ltsv<W: Write>(out: W, rows: &[MainteScheduledServer]) -> Result<(), WriteError> {
    let mut writer = BufWriter::new(out);

    for row in rows {
        let fields: Vec<String> = MainteScheduledServer::COLUMNS
            .iter()
            .zip(row.values())
            .map(|(label, value)| format!("{label}:{value}"))
            .collect();
        writeln!(writer, "{}", fields.join("\t"))?;
    }
    writer.flush()?;

    Ok(())
}

/// A single JSON array, newline terminated
pub fn write_json<W: Write>(
    out: W,
    indent: bool,
    rows: &[MainteScheduledServer],
) -> Result<(), WriteError> {
    let mut writer = BufWriter::new(out);

    if indent {
        serde_json::to_writer_pretty(&mut writer, rows)?;
    } else {
        serde_json::to_writer(&mut writer, rows)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}
