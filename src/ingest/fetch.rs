//! Retrieval of the daily `.csv.gz` exports.
//!
//! Files are cached on disk compressed and decompressed only at parse time.
//! Downloads for the three exports run concurrently; any failure aborts the
//! whole generation run so a stale-but-valid snapshot is never replaced by a
//! partial one.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::info;

use super::IngestError;

/// The three export files a generation run consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Tags,
    TagAliases,
    Posts,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Tags, SourceKind::TagAliases, SourceKind::Posts];

    pub fn stem(self) -> &'static str {
        match self {
            SourceKind::Tags => "tags",
            SourceKind::TagAliases => "tag_aliases",
            SourceKind::Posts => "posts",
        }
    }
}

/// Locates (and if needed downloads) one dated set of export files.
#[derive(Debug, Clone)]
pub struct SourceSet {
    base_url: String,
    export_date: String,
    cache_dir: PathBuf,
}

impl SourceSet {
    pub fn new(base_url: impl Into<String>, export_date: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            export_date: export_date.into(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn export_date(&self) -> &str {
        &self.export_date
    }

    pub fn path(&self, kind: SourceKind) -> PathBuf {
        self.cache_dir
            .join(format!("{}-{}.csv.gz", kind.stem(), self.export_date))
    }

    pub fn url(&self, kind: SourceKind) -> String {
        format!(
            "{}/{}-{}.csv.gz",
            self.base_url.trim_end_matches('/'),
            kind.stem(),
            self.export_date
        )
    }

    /// Downloads every export that is not already cached. Concurrent across
    /// files; each individual download is sequential streaming.
    pub async fn ensure_all(&self) -> Result<(), IngestError> {
        tokio::fs::create_dir_all(&self.cache_dir).await?;
        let client = reqwest::Client::new();

        tokio::try_join!(
            self.ensure_one(&client, SourceKind::Tags),
            self.ensure_one(&client, SourceKind::TagAliases),
            self.ensure_one(&client, SourceKind::Posts),
        )?;
        Ok(())
    }

    /// Verifies that every export is present on disk without touching the
    /// network (offline mode).
    pub fn verify_cached(&self) -> Result<(), IngestError> {
        for kind in SourceKind::ALL {
            let path = self.path(kind);
            if !path.exists() {
                return Err(IngestError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("missing cached export: {}", path.display()),
                )));
            }
        }
        Ok(())
    }

    async fn ensure_one(&self, client: &reqwest::Client, kind: SourceKind) -> Result<(), IngestError> {
        let path = self.path(kind);
        if path.exists() {
            info!(file = %path.display(), "export already cached, skipping download");
            return Ok(());
        }
        download_to(client, &self.url(kind), &path).await
    }
}

/// Streams `url` into `path`, via a `.part` file so an interrupted download
/// never looks like a complete cache entry.
async fn download_to(client: &reqwest::Client, url: &str, path: &Path) -> Result<(), IngestError> {
    info!(%url, "downloading export");

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(IngestError::DownloadFailed {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let part_path = path.with_extension("gz.part");
    let mut file = tokio::fs::File::create(&part_path).await?;
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk: Bytes = chunk?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&part_path, path).await?;
    info!(file = %path.display(), "download complete");
    Ok(())
}
