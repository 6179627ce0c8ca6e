use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes search result rows as CSV, with a header row derived from the
/// field names of `R`.
///
/// The header is taken from the first row, so an empty iterator produces
/// empty output. Returns the number of data rows written.
pub fn write_contacts_csv<R, W>(
    rows: impl IntoIterator<Item = R>,
    writer: W,
) -> Result<usize, ReportError>
where
    R: Serialize,
    W: Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut count = 0;
    for row in rows {
        csv_writer.serialize(row)?;
        count += 1;
    }
    csv_writer.flush()?;
    Ok(count)
}

/// Writes search result rows to a CSV file, replacing any existing file.
pub fn write_contacts_csv_to_path<R, P>(
    rows: impl IntoIterator<Item = R>,
    path: P,
) -> Result<usize, ReportError>
where
    R: Serialize,
    P: AsRef<Path>,
{
    let file = std::fs::File::create(path)?;
    write_contacts_csv(rows, io::BufWriter::new(file))
}
