//! Reporting of mapped records.
//!
//! The whole collection is rendered once and written in a single call to
//! stdout, or to any other writer. CSV append is available for keeping a
//! running history across days.

use clap::ValueEnum;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;
use crate::record::{OutputRecord, map_one};
use crate::types::RawFeedObject;

/// How the record collection is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON array on one line.
    #[default]
    Json,
    /// Indented JSON array.
    Pretty,
}

/// Maps every raw object in order, stopping at the first malformed one.
pub fn map_all(raw: &[RawFeedObject]) -> Result<Vec<OutputRecord>> {
    raw.iter().map(map_one).collect()
}

/// Renders the collection as a JSON array.
pub fn render(records: &[OutputRecord], format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string(records)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(records)?,
    };
    Ok(text)
}

/// Maps `raw` and writes the full collection to `out` in one shot.
///
/// Nothing is written if any object fails to map.
pub fn report<W: Write>(
    raw: &[RawFeedObject],
    format: OutputFormat,
    out: &mut W,
) -> Result<Vec<OutputRecord>> {
    let records = map_all(raw)?;
    let text = render(&records, format)?;

    writeln!(out, "{text}")?;
    out.flush()?;

    info!(records = records.len(), "Records reported");
    Ok(records)
}

/// Appends records as rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_records(path: &str, records: &[OutputRecord]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = records.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
