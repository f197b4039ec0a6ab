use serde::{Deserialize, Serialize};

/// Content-sensitivity rating of a post, keyed by the single-letter code in
/// the post export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingTier {
    Safe,
    Questionable,
    Explicit,
}

impl RatingTier {
    /// Maps the export's rating code. Unknown codes yield `None` and the post
    /// is skipped for preview purposes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "s" | "S" => Some(RatingTier::Safe),
            "q" | "Q" => Some(RatingTier::Questionable),
            "e" | "E" => Some(RatingTier::Explicit),
            _ => None,
        }
    }

    pub const ALL: [RatingTier; 3] = [
        RatingTier::Safe,
        RatingTier::Questionable,
        RatingTier::Explicit,
    ];
}
