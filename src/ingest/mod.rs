pub mod fetch;
pub mod reader;
pub mod rows;

pub use fetch::{SourceKind, SourceSet};
pub use reader::{open_gzip_rows, rows_from_reader};
pub use rows::{AliasRow, PostRow, TagRow};

use thiserror::Error;

/// Errors raised while retrieving or opening source exports.
///
/// Row-level problems (wrong width, bad types) are never errors: noisy rows
/// are dropped silently per the ingestion contract. Only I/O-level failures
/// surface here, and they are fatal to the generation run.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Download of {url} failed with status {status}")]
    DownloadFailed { url: String, status: u16 },
}
