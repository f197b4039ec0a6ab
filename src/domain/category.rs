use serde::{Deserialize, Serialize};

/// Tag classification as encoded in the upstream export (`tags.csv` column 2).
///
/// The numeric codes are fixed by the export format and are preserved in both
/// snapshot encodings, so the enum round-trips through its `u8` repr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Category {
    General = 0,
    Artist = 1,
    Contributor = 2,
    Copyright = 3,
    Character = 4,
    Species = 5,
    Invalid = 6,
    Meta = 7,
    Lore = 8,
}

/// Categories that participate in the game. Contributor, invalid, meta and
/// lore tags are excluded from ranking entirely.
pub const VISIBLE_CATEGORIES: [Category; 5] = [
    Category::General,
    Category::Artist,
    Category::Copyright,
    Category::Character,
    Category::Species,
];

impl Category {
    /// Character and species previews must come from `solo` posts to avoid
    /// group scenes where the pictured subject is ambiguous.
    pub fn requires_solo_preview(self) -> bool {
        matches!(self, Category::Character | Category::Species)
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> Self {
        category as u8
    }
}

impl TryFrom<u8> for Category {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Category::General),
            1 => Ok(Category::Artist),
            2 => Ok(Category::Contributor),
            3 => Ok(Category::Copyright),
            4 => Ok(Category::Character),
            5 => Ok(Category::Species),
            6 => Ok(Category::Invalid),
            7 => Ok(Category::Meta),
            8 => Ok(Category::Lore),
            other => Err(format!("unknown tag category code: {other}")),
        }
    }
}
