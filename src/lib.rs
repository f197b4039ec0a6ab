#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::cast_lossless,            // Infallible casts are clear enough with `as`
    clippy::cast_possible_truncation, // Safe within realistic value bounds (counts, scores)
    clippy::cast_sign_loss,           // Safe where values are known non-negative
    clippy::cast_precision_loss,      // Acceptable for PRNG float derivation
    clippy::missing_errors_doc,       // Internal API
    clippy::missing_panics_doc,       // Internal API
    clippy::module_name_repetitions,  // e.g. SnapshotError in snapshot module
    clippy::must_use_candidate        // Annotated selectively on critical APIs
)]

pub mod app;
pub mod daily;
pub mod domain;
pub mod ingest;
pub mod pipeline;
pub mod snapshot;

// Re-export main types for easy access
pub use app::Config;
pub use domain::{Category, Dataset, RankedTag, RatingTier};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
