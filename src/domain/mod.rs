pub mod category;
pub mod denylist;
pub mod rating;
pub mod tag;

pub use category::Category;
pub use denylist::Denylist;
pub use rating::RatingTier;
pub use tag::{DailyChallenge, Dataset, ImagePreviews, ImageSlot, RankedTag, TagRecord};
