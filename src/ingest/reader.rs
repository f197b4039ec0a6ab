//! Streaming row access to gzip-compressed CSV exports.
//!
//! The exports are multi-gigabyte at rest, so rows are pulled through the
//! gzip decoder one at a time; nothing buffers more than a single record.
//! The header row is consumed by the CSV reader and never reaches callers.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::StringRecord;

use super::IngestError;

/// Builds a row iterator over any byte source. `flexible` width is enabled
/// because malformed rows are dropped downstream, not rejected here.
pub fn rows_from_reader<R: Read>(
    source: R,
) -> impl Iterator<Item = Result<StringRecord, csv::Error>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(source))
        .into_records()
}

/// Opens a `.csv.gz` export for streaming row iteration.
pub fn open_gzip_rows(
    path: &Path,
) -> Result<impl Iterator<Item = Result<StringRecord, csv::Error>>, IngestError> {
    let file = File::open(path)?;
    let decoder = flate2::read::GzDecoder::new(BufReader::new(file));
    Ok(rows_from_reader(decoder))
}
