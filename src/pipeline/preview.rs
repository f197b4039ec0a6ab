//! Preview assignment: one streaming pass over the post export that fills
//! each ranked tag's per-tier image slots.
//!
//! This is an online greedy assignment with retroactive eviction, not a plain
//! max-by-tag reduction: a physical asset (md5) may back at most one tag's
//! preview per tier, so a stronger later claim evicts a weaker earlier one
//! and weaker later claims are refused outright.

use std::collections::HashMap;

use csv::StringRecord;
use tracing::debug;

use crate::domain::{Denylist, ImageSlot, RankedTag, RatingTier};
use crate::ingest::rows::PostRow;

/// File extensions eligible as previews by default. Animated and video
/// formats are excluded from the game board.
pub const DEFAULT_ACCEPTED_EXTS: &[&str] = &["png", "jpg"];

/// Token that marks a post as depicting a single subject.
pub const SOLO_TOKEN: &str = "solo";

/// Post-acceptance policy for the preview pass.
#[derive(Debug, Clone)]
pub struct PreviewPolicy {
    accepted_exts: Vec<String>,
    denylist: Denylist,
}

impl PreviewPolicy {
    pub fn new(denylist: Denylist, allow_gif: bool) -> Self {
        let mut accepted_exts: Vec<String> =
            DEFAULT_ACCEPTED_EXTS.iter().map(ToString::to_string).collect();
        if allow_gif {
            accepted_exts.push("gif".to_string());
        }
        Self {
            accepted_exts,
            denylist,
        }
    }

    fn accepts_ext(&self, ext: &str) -> bool {
        self.accepted_exts.iter().any(|accepted| accepted == ext)
    }
}

impl Default for PreviewPolicy {
    fn default() -> Self {
        Self::new(Denylist::default(), false)
    }
}

/// Record of which tag currently owns an asset, and at what strength.
#[derive(Debug, Clone, Copy)]
struct Claim {
    tag_index: usize,
    tier: RatingTier,
    score: i64,
}

/// Working set for the streaming preview pass. Build once from the ranked
/// tag list, feed every post row, then `finish()`.
pub struct PreviewAssigner {
    tags: Vec<RankedTag>,
    index: HashMap<String, usize>,
    claims: HashMap<String, Claim>,
    policy: PreviewPolicy,
}

impl PreviewAssigner {
    pub fn new(tags: Vec<RankedTag>, policy: PreviewPolicy) -> Self {
        let index = tags
            .iter()
            .enumerate()
            .map(|(i, tag)| (tag.name.clone(), i))
            .collect();
        Self {
            tags,
            index,
            claims: HashMap::new(),
            policy,
        }
    }

    /// Consumes a whole row stream. Unreadable rows are dropped silently.
    pub fn observe_rows<I>(&mut self, rows: I)
    where
        I: Iterator<Item = Result<StringRecord, csv::Error>>,
    {
        for record in rows.filter_map(Result::ok) {
            if let Some(post) = PostRow::parse(&record) {
                self.observe_post(&post);
            }
        }
    }

    pub fn observe_post(&mut self, post: &PostRow) {
        if post.deleted
            || post.score < 0
            || !self.policy.accepts_ext(&post.ext)
            || self.policy.denylist.matches_any_token(&post.tags)
        {
            return;
        }
        let Some(tier) = RatingTier::from_code(&post.rating) else {
            return;
        };
        let is_solo = post.tags.split_whitespace().any(|token| token == SOLO_TOKEN);

        for token in post.tags.split_whitespace() {
            let Some(&tag_index) = self.index.get(token) else {
                continue;
            };
            self.try_assign(tag_index, tier, is_solo, post);
        }
    }

    fn try_assign(&mut self, tag_index: usize, tier: RatingTier, is_solo: bool, post: &PostRow) {
        if self.tags[tag_index].category.requires_solo_preview() && !is_solo {
            return;
        }
        // Monotonic best-so-far for this tag+tier.
        if self.tags[tag_index]
            .images
            .score(tier)
            .is_some_and(|held| held >= post.score)
        {
            return;
        }

        if let Some(claim) = self.claims.get(&post.md5).copied() {
            if claim.tag_index == tag_index {
                // Same tag, same asset under another rating code: the asset
                // moves to the new tier. Clearing the old slot keeps the
                // single claim entry in sync with what the tag holds.
                if claim.tier != tier {
                    self.tags[tag_index].images.clear(claim.tier);
                }
            } else {
                if post.score <= claim.score {
                    // The asset stays with its current owner; this tag gets
                    // nothing from this post.
                    return;
                }
                // Strictly stronger claim: evict the previous owner's slot.
                self.tags[claim.tag_index].images.clear(claim.tier);
            }
        }

        // The asset this tag held for the tier is being replaced; release its
        // claim so the side map stays consistent with the slots.
        if let Some(previous) = self.tags[tag_index].images.slot(tier) {
            if previous.md5 != post.md5 {
                let stale = previous.md5.clone();
                self.claims.remove(&stale);
            }
        }

        self.tags[tag_index].images.set(
            tier,
            ImageSlot {
                post_id: post.id,
                md5: post.md5.clone(),
                ext: post.ext.clone(),
                score: post.score,
            },
        );
        self.claims.insert(
            post.md5.clone(),
            Claim {
                tag_index,
                tier,
                score: post.score,
            },
        );
    }

    pub fn finish(self) -> Vec<RankedTag> {
        debug!(
            tags = self.tags.len(),
            claimed_assets = self.claims.len(),
            "preview assignment finished"
        );
        self.tags
    }
}
