pub mod cache;
pub mod pairing;
pub mod rng;

pub use cache::{ChallengeStore, FileChallengeStore};
pub use pairing::{
    DEFAULT_MAX_COUNT_DIFFERENCE, DEFAULT_MAX_ROUNDS, PairingConfig, generate_pairs,
};
pub use rng::{Mulberry32, seed_from_str};

use thiserror::Error;
use tracing::info;

use crate::domain::{DailyChallenge, Dataset};

#[derive(Error, Debug)]
pub enum DailyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returns the challenge for `challenge_date`, generating and storing it on
/// first request. Generation is pure and seeded by the date, so concurrent
/// first requests race harmlessly: every contender computes the same pairs.
pub async fn fetch_or_generate<S: ChallengeStore>(
    store: &S,
    dataset: &Dataset,
    challenge_date: &str,
    config: &PairingConfig,
) -> Result<DailyChallenge, DailyError> {
    if let Some(existing) = store.load(challenge_date).await? {
        return Ok(existing);
    }

    let pairs = generate_pairs(&dataset.tags, challenge_date, config);
    info!(
        date = %challenge_date,
        rounds = pairs.len(),
        pool = dataset.tags.len(),
        "generated daily challenge"
    );
    let challenge = DailyChallenge {
        challenge_date: challenge_date.to_string(),
        data_date: dataset.generation_date.clone(),
        pairs,
    };
    store.store(&challenge).await?;
    Ok(challenge)
}
