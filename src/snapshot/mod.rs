//! Dataset snapshot persistence.
//!
//! Two encodings of the same logical content: a pretty-printed JSON file for
//! inspection and diffing, and a compact bincode file for low-latency loads.
//! A snapshot is write-once; nothing mutates it after emission.

use std::path::Path;

use thiserror::Error;

use crate::domain::Dataset;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("Decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

pub fn write_json(path: &Path, dataset: &Dataset) -> Result<(), SnapshotError> {
    let json = serde_json::to_vec_pretty(dataset)?;
    write_atomic(path, &json)
}

pub fn write_binary(path: &Path, dataset: &Dataset) -> Result<(), SnapshotError> {
    let encoded = bincode::serde::encode_to_vec(dataset, bincode::config::standard())?;
    write_atomic(path, &encoded)
}

/// Loads a snapshot, picking the codec from the file extension: `.bin` is
/// bincode, anything else is treated as JSON.
pub fn load(path: &Path) -> Result<Dataset, SnapshotError> {
    let raw = std::fs::read(path)?;
    if path.extension().is_some_and(|ext| ext == "bin") {
        let (dataset, _) = bincode::serde::decode_from_slice(&raw, bincode::config::standard())?;
        Ok(dataset)
    } else {
        Ok(serde_json::from_slice(&raw)?)
    }
}

// Write-then-rename so a crashed run never leaves a truncated snapshot where
// a valid one stood.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    // Temp name keeps the codec extension so the JSON and binary writers
    // never collide on a shared output directory.
    let tmp = match path.extension() {
        Some(ext) => {
            let mut qualified = ext.to_os_string();
            qualified.push(".tmp");
            path.with_extension(qualified)
        }
        None => path.with_extension("tmp"),
    };
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
