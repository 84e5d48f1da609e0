//! CSV persistence for fitness entries.
//!
//! The log is a header line followed by one unquoted, comma-separated
//! line per entry. Loading is fault tolerant: a malformed line is logged
//! and skipped, and I/O faults are logged and turned into a failure value
//! instead of an error.

use crate::entry::CSV_COLUMNS;
use crate::{Error, FitnessEntry, Result};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write the header and every entry to `writer`, in input order
///
/// Fails with [`Error::Format`] before anything is written if an entry
/// would not load back from its one-decimal rendering (a weight below
/// 0.05 rounds to `0.0`).
pub fn write_entries<W: Write>(entries: &[FitnessEntry], writer: W) -> Result<()> {
    for entry in entries {
        let line = entry.to_csv_line();
        if let Err(e) = parse_line(&line) {
            return Err(Error::Format(format!(
                "entry {} would not load back as {:?}: {}",
                entry.date(),
                line,
                e
            )));
        }
    }

    // The format has no quoting, so never let the writer add any
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(CSV_COLUMNS)?;
    for entry in entries {
        writer.write_record(entry.csv_fields())?;
    }

    writer.flush()?;
    Ok(())
}

/// Save entries to a CSV file, replacing any previous contents
///
/// The file is written to a temp file in the same directory, synced, and
/// renamed over `path`, so a failed save leaves the old log untouched.
/// An existing log keeps its permissions.
/// Returns `false` if any step fails; the cause is logged, not returned.
pub fn save_to_file(entries: &[FitnessEntry], path: &Path) -> bool {
    match write_file(entries, path) {
        Ok(()) => {
            tracing::info!("Saved {} entries to {:?}", entries.len(), path);
            true
        }
        Err(e) => {
            tracing::error!("Save failed for {:?}: {}", path, e);
            false
        }
    }
}

fn write_file(entries: &[FitnessEntry], path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let temp = NamedTempFile::new_in(dir)?;
    write_entries(entries, BufWriter::new(temp.as_file()))?;
    temp.as_file().sync_all()?;

    // The temp file is created 0600; carry over the mode of the log it replaces
    if let Ok(metadata) = std::fs::metadata(path) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }

    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// Read entries from a CSV source
///
/// The first line is discarded as the header without being checked.
/// Blank lines are ignored and malformed lines are logged and skipped.
/// Only I/O faults are returned as errors.
pub fn read_entries<R: BufRead>(reader: R) -> Result<Vec<FitnessEntry>> {
    let mut entries = Vec::new();
    read_into(reader, &mut entries)?;
    Ok(entries)
}

/// Push every parseable line onto `entries`, returning the number skipped
///
/// Lines are read as raw bytes so that a stray non-UTF-8 byte only
/// affects its own line; it is decoded lossily and parsed as usual.
fn read_into<R: BufRead>(mut reader: R, entries: &mut Vec<FitnessEntry>) -> Result<usize> {
    let mut skipped = 0;
    let mut buf = Vec::new();
    let mut line_num = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_num += 1;
        if line_num == 1 {
            continue;
        }

        let raw = strip_line_ending(&buf);
        let line = String::from_utf8_lossy(raw);
        if let Cow::Owned(_) = line {
            tracing::warn!("Line {} is not valid UTF-8, decoding lossily", line_num);
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Skipping invalid line {}: {}", line_num, e);
                skipped += 1;
            }
        }
    }

    Ok(skipped)
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

/// Load entries from a CSV file
///
/// Never fails: a missing or unreadable file is logged and yields an
/// empty list, and a read fault part way through keeps the entries
/// parsed before it.
pub fn load_from_file(path: &Path) -> Vec<FitnessEntry> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("Load failed for {:?}: {}", path, e);
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    match read_into(BufReader::new(file), &mut entries) {
        Ok(0) => {}
        Ok(skipped) => tracing::warn!("Skipped {} invalid lines in {:?}", skipped, path),
        Err(e) => tracing::error!(
            "Load failed for {:?} after {} entries: {}",
            path,
            entries.len(),
            e
        ),
    }

    tracing::debug!("Loaded {} entries from {:?}", entries.len(), path);
    entries
}

/// Parse one CSV data line into a validated entry
///
/// Fails with [`Error::Format`] when the line does not have exactly six
/// fields or a numeric field does not parse, and with
/// [`Error::Validation`] when the values violate an entry constraint.
pub fn parse_line(line: &str) -> Result<FitnessEntry> {
    if line.trim().is_empty() {
        return Err(Error::Format("line cannot be empty".into()));
    }

    let mut parts: Vec<&str> = line.split(',').collect();
    // Trailing empty fields are dropped, so "...,71.0," still has six columns
    while parts.len() > 1 && parts.last() == Some(&"") {
        parts.pop();
    }
    let parts: Vec<&str> = parts.into_iter().map(str::trim).collect();
    if parts.len() != CSV_COLUMNS.len() {
        return Err(Error::Format(format!(
            "expected {} columns, got {}",
            CSV_COLUMNS.len(),
            parts.len()
        )));
    }

    let invalid = || Error::Format(format!("invalid number format in line: {}", line));
    let heart_rate: i32 = parts[1].parse().map_err(|_| invalid())?;
    let steps: i32 = parts[2].parse().map_err(|_| invalid())?;
    let calories: i32 = parts[3].parse().map_err(|_| invalid())?;
    let sleep_hours: f64 = parts[4].parse().map_err(|_| invalid())?;
    let weight: f64 = parts[5].parse().map_err(|_| invalid())?;

    FitnessEntry::new(parts[0], heart_rate, steps, calories, sleep_hours, weight)
}

/// Check whether the CSV log exists
pub fn file_exists(path: &Path) -> bool {
    path.exists()
}
