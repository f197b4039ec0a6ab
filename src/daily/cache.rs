//! Challenge storage behind an explicit key-value seam.
//!
//! The daily challenge is shared by every user, so serving layers cache it
//! under a date-qualified key instead of an in-process singleton. Any store
//! that can hold a small JSON value per date works; the file-backed
//! implementation below is enough for single-host deployments and tests.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::DailyChallenge;

use super::DailyError;

/// Key-value persistence for generated challenges, keyed by challenge date.
#[async_trait]
pub trait ChallengeStore: Send + Sync {
    /// Returns the stored challenge for `challenge_date`, or `None` when no
    /// matching entry exists (including entries stored for other dates).
    async fn load(&self, challenge_date: &str) -> Result<Option<DailyChallenge>, DailyError>;

    async fn store(&self, challenge: &DailyChallenge) -> Result<(), DailyError>;
}

/// One JSON file per challenge date under a spool directory.
#[derive(Debug, Clone)]
pub struct FileChallengeStore {
    dir: PathBuf,
}

impl FileChallengeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, challenge_date: &str) -> PathBuf {
        self.dir.join(format!("daily-{challenge_date}.json"))
    }
}

#[async_trait]
impl ChallengeStore for FileChallengeStore {
    async fn load(&self, challenge_date: &str) -> Result<Option<DailyChallenge>, DailyError> {
        let path = self.key_path(challenge_date);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let challenge: DailyChallenge = serde_json::from_slice(&raw)?;
        // Stored date must match the requested one; anything else is stale.
        if challenge.challenge_date != challenge_date {
            debug!(
                stored = %challenge.challenge_date,
                requested = %challenge_date,
                "ignoring stale cached challenge"
            );
            return Ok(None);
        }
        Ok(Some(challenge))
    }

    async fn store(&self, challenge: &DailyChallenge) -> Result<(), DailyError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.key_path(&challenge.challenge_date);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec(challenge)?).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}
