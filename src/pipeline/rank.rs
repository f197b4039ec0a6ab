//! Per-category top-N selection over the tag catalog.

use std::collections::HashMap;

use crate::domain::{Category, RankedTag, TagRecord};

/// Default per-category cap (the game serves at most this many tags per
/// visible category).
pub const DEFAULT_TOP_PER_CATEGORY: usize = 1000;

/// Selects the top `cap` tags of each listed category, count descending,
/// zero-count tags excluded. Ties on count order lexicographically by name
/// ascending, which keeps the output independent of map iteration order.
///
/// The result is the concatenation of the per-category slices, in the order
/// `categories` was given.
pub fn select_top_tags(
    catalog: &HashMap<String, TagRecord>,
    categories: &[Category],
    cap: usize,
) -> Vec<RankedTag> {
    let mut ranked = Vec::new();

    for &category in categories {
        let mut slice: Vec<&TagRecord> = catalog
            .values()
            .filter(|tag| tag.category == category && tag.count > 0)
            .collect();
        slice.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        slice.truncate(cap);
        ranked.extend(slice.into_iter().cloned().map(RankedTag::from));
    }

    ranked
}
