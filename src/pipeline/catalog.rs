//! Tag catalog aggregation: the authoritative name -> record mapping.

use std::collections::HashMap;

use csv::StringRecord;
use tracing::debug;

use crate::domain::{Denylist, TagRecord};
use crate::ingest::rows::{AliasRow, TagRow};

/// Folds the tag export into the catalog. Later rows for the same name
/// overwrite earlier ones; denylisted names never enter. Unreadable or
/// malformed rows are dropped silently.
pub fn build_catalog<I>(rows: I, denylist: &Denylist) -> HashMap<String, TagRecord>
where
    I: Iterator<Item = Result<StringRecord, csv::Error>>,
{
    let mut catalog = HashMap::new();
    let mut skipped = 0u64;

    for record in rows.filter_map(Result::ok) {
        let Some(row) = TagRow::parse(&record) else {
            skipped += 1;
            continue;
        };
        if denylist.contains(&row.name) {
            continue;
        }
        catalog.insert(
            row.name.clone(),
            TagRecord::new(row.name, row.category, row.count),
        );
    }

    debug!(tags = catalog.len(), skipped, "tag catalog built");
    catalog
}

/// Attaches alternate spellings from the alias export to their canonical
/// catalog entries. Aliases for unknown (or denylisted, hence absent)
/// consequents are ignored.
pub fn fold_aliases<I>(rows: I, catalog: &mut HashMap<String, TagRecord>)
where
    I: Iterator<Item = Result<StringRecord, csv::Error>>,
{
    let mut folded = 0u64;
    for record in rows.filter_map(Result::ok) {
        let Some(row) = AliasRow::parse(&record) else {
            continue;
        };
        if let Some(tag) = catalog.get_mut(&row.consequent) {
            tag.aliases.push(row.antecedent);
            folded += 1;
        }
    }
    debug!(folded, "aliases folded into catalog");
}
