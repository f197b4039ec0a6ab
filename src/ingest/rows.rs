//! Typed views over raw export rows.
//!
//! Each `parse` returns `None` for rows that are structurally invalid or fail
//! type coercion; callers drop those rows without logging per row (the
//! upstream exports are noisy by design).

use csv::StringRecord;

use crate::domain::Category;

// tags.csv: id, name, category, post_count
const TAG_MIN_FIELDS: usize = 4;
const TAG_NAME: usize = 1;
const TAG_CATEGORY: usize = 2;
const TAG_COUNT: usize = 3;

// tag_aliases.csv: id, antecedent_name, consequent_name, created_at, status
const ALIAS_MIN_FIELDS: usize = 5;
const ALIAS_ANTECEDENT: usize = 1;
const ALIAS_CONSEQUENT: usize = 2;

/// posts.csv is a fixed 29-column export; any other width means the row was
/// mangled (usually an unescaped delimiter) and is dropped.
pub const POST_FIELD_COUNT: usize = 29;
const POST_ID: usize = 0;
const POST_MD5: usize = 3;
const POST_RATING: usize = 5;
const POST_TAGS: usize = 8;
const POST_EXT: usize = 11;
const POST_DELETED: usize = 20;
const POST_SCORE: usize = 23;

/// One row of the tag dictionary export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRow {
    pub name: String,
    pub category: Category,
    pub count: u64,
}

impl TagRow {
    pub fn parse(record: &StringRecord) -> Option<Self> {
        if record.len() < TAG_MIN_FIELDS {
            return None;
        }
        record.get(0)?.parse::<u64>().ok()?;

        let name = record.get(TAG_NAME)?;
        let category_code = record.get(TAG_CATEGORY)?.parse::<u8>().ok()?;
        let category = Category::try_from(category_code).ok()?;
        // The export occasionally carries negative counts for tags mid-cleanup;
        // clamp to zero so they fall out at rank selection.
        let count = record.get(TAG_COUNT)?.parse::<i64>().ok()?.max(0) as u64;

        Some(Self {
            name: name.to_string(),
            category,
            count,
        })
    }
}

/// One row of the alias export: `antecedent` is an alternate spelling of the
/// canonical `consequent` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRow {
    pub antecedent: String,
    pub consequent: String,
}

impl AliasRow {
    pub fn parse(record: &StringRecord) -> Option<Self> {
        if record.len() < ALIAS_MIN_FIELDS {
            return None;
        }
        record.get(0)?.parse::<u64>().ok()?;

        Some(Self {
            antecedent: record.get(ALIAS_ANTECEDENT)?.to_string(),
            consequent: record.get(ALIAS_CONSEQUENT)?.to_string(),
        })
    }
}

/// One row of the post export, narrowed to the fields the preview assigner
/// needs. Policy checks (deleted flag, extension, score sign, denylist) are
/// the assigner's job; this only validates structure and types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: u64,
    pub md5: String,
    pub rating: String,
    /// Whitespace-separated tag token list, unsplit.
    pub tags: String,
    pub ext: String,
    pub deleted: bool,
    pub score: i64,
}

impl PostRow {
    pub fn parse(record: &StringRecord) -> Option<Self> {
        if record.len() != POST_FIELD_COUNT {
            return None;
        }
        let id = record.get(POST_ID)?.parse::<u64>().ok()?;
        let score = record.get(POST_SCORE)?.parse::<i64>().ok()?;

        Some(Self {
            id,
            md5: record.get(POST_MD5)?.to_string(),
            rating: record.get(POST_RATING)?.to_string(),
            tags: record.get(POST_TAGS)?.to_string(),
            ext: record.get(POST_EXT)?.to_string(),
            deleted: record.get(POST_DELETED)? == "t",
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    fn post_fields(id: &str, md5: &str, rating: &str, tags: &str, ext: &str, deleted: &str, score: &str) -> StringRecord {
        let mut fields = vec![""; POST_FIELD_COUNT];
        fields[POST_ID] = id;
        fields[POST_MD5] = md5;
        fields[POST_RATING] = rating;
        fields[POST_TAGS] = tags;
        fields[POST_EXT] = ext;
        fields[POST_DELETED] = deleted;
        fields[POST_SCORE] = score;
        record(&fields)
    }

    #[test]
    fn tag_row_parses_valid_record() {
        let row = TagRow::parse(&record(&["1", "dragon", "5", "120000", "extra"])).unwrap();
        assert_eq!(row.name, "dragon");
        assert_eq!(row.category, Category::Species);
        assert_eq!(row.count, 120_000);
    }

    #[test]
    fn tag_row_drops_short_and_non_numeric_records() {
        assert!(TagRow::parse(&record(&["1", "dragon", "5"])).is_none());
        assert!(TagRow::parse(&record(&["x", "dragon", "5", "10"])).is_none());
        assert!(TagRow::parse(&record(&["1", "dragon", "cat", "10"])).is_none());
        assert!(TagRow::parse(&record(&["1", "dragon", "99", "10"])).is_none());
    }

    #[test]
    fn tag_row_clamps_negative_counts() {
        let row = TagRow::parse(&record(&["1", "broken", "0", "-5"])).unwrap();
        assert_eq!(row.count, 0);
    }

    #[test]
    fn alias_row_parses_valid_record() {
        let row = AliasRow::parse(&record(&["9", "drgn", "dragon", "2020-01-01", "active"])).unwrap();
        assert_eq!(row.antecedent, "drgn");
        assert_eq!(row.consequent, "dragon");
    }

    #[test]
    fn alias_row_drops_short_records() {
        assert!(AliasRow::parse(&record(&["9", "drgn", "dragon", "2020-01-01"])).is_none());
    }

    #[test]
    fn post_row_requires_exact_width() {
        let narrow = record(&["1", "a", "b"]);
        assert!(PostRow::parse(&narrow).is_none());

        let row = PostRow::parse(&post_fields("42", "cafe", "s", "dragon solo", "png", "f", "17")).unwrap();
        assert_eq!(row.id, 42);
        assert_eq!(row.md5, "cafe");
        assert_eq!(row.rating, "s");
        assert_eq!(row.ext, "png");
        assert!(!row.deleted);
        assert_eq!(row.score, 17);
    }

    #[test]
    fn post_row_drops_non_numeric_id_and_score() {
        assert!(PostRow::parse(&post_fields("nope", "cafe", "s", "dragon", "png", "f", "17")).is_none());
        assert!(PostRow::parse(&post_fields("42", "cafe", "s", "dragon", "png", "f", "high")).is_none());
    }

    #[test]
    fn post_row_reads_deleted_flag() {
        let row = PostRow::parse(&post_fields("42", "cafe", "s", "dragon", "png", "t", "17")).unwrap();
        assert!(row.deleted);
    }
}
