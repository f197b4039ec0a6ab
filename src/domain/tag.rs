use super::category::Category;
use super::rating::RatingTier;
use serde::{Deserialize, Serialize};

/// Aggregation-time tag entry: one per unique name in the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub name: String,
    pub category: Category,
    pub count: u64,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl TagRecord {
    pub fn new(name: impl Into<String>, category: Category, count: u64) -> Self {
        Self {
            name: name.into(),
            category,
            count,
            aliases: Vec::new(),
        }
    }
}

/// Best-scoring preview observed for one tag within one rating tier.
///
/// The md5 identifies the underlying asset; the preview assigner guarantees
/// that no two tags in a finished dataset hold the same md5 for the same tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSlot {
    pub post_id: u64,
    pub md5: String,
    pub ext: String,
    pub score: i64,
}

/// Per-tier preview slots. An empty slot (`None`) behaves as score = -inf:
/// any non-negative scoring candidate beats it.
///
/// Note: `skip_serializing_if` is intentionally omitted for bincode
/// compatibility; absent slots serialize as explicit nulls in JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePreviews {
    #[serde(default)]
    pub safe: Option<ImageSlot>,
    #[serde(default)]
    pub questionable: Option<ImageSlot>,
    #[serde(default)]
    pub explicit: Option<ImageSlot>,
}

impl ImagePreviews {
    pub fn slot(&self, tier: RatingTier) -> Option<&ImageSlot> {
        match tier {
            RatingTier::Safe => self.safe.as_ref(),
            RatingTier::Questionable => self.questionable.as_ref(),
            RatingTier::Explicit => self.explicit.as_ref(),
        }
    }

    fn slot_mut(&mut self, tier: RatingTier) -> &mut Option<ImageSlot> {
        match tier {
            RatingTier::Safe => &mut self.safe,
            RatingTier::Questionable => &mut self.questionable,
            RatingTier::Explicit => &mut self.explicit,
        }
    }

    pub fn set(&mut self, tier: RatingTier, slot: ImageSlot) {
        *self.slot_mut(tier) = Some(slot);
    }

    /// Resets the tier to empty. Used when a stronger claim from another tag
    /// evicts this tag's preview.
    pub fn clear(&mut self, tier: RatingTier) {
        *self.slot_mut(tier) = None;
    }

    pub fn score(&self, tier: RatingTier) -> Option<i64> {
        self.slot(tier).map(|slot| slot.score)
    }
}

/// A fully ranked and enriched tag, ready for serialization.
///
/// This is the canonical output unit of the generation pipeline: created once
/// after rank selection, mutated only during the preview-assignment pass, and
/// treated as read-only by every downstream consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTag {
    pub name: String,
    pub category: Category,
    pub count: u64,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub images: ImagePreviews,
}

impl From<TagRecord> for RankedTag {
    fn from(record: TagRecord) -> Self {
        Self {
            name: record.name,
            category: record.category,
            count: record.count,
            aliases: record.aliases,
            images: ImagePreviews::default(),
        }
    }
}

/// Persisted snapshot of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Calendar date (UTC, `YYYY-MM-DD`) the source export represents.
    pub generation_date: String,
    pub tags: Vec<RankedTag>,
}

/// The shared daily challenge: the same date always yields the same pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChallenge {
    /// Calendar date (UTC, `YYYY-MM-DD`) the pairs are valid for.
    pub challenge_date: String,
    /// Generation date of the dataset the pairs were drawn from.
    pub data_date: String,
    pub pairs: Vec<(RankedTag, RankedTag)>,
}
