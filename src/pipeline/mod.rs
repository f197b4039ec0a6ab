pub mod catalog;
pub mod preview;
pub mod rank;

pub use catalog::{build_catalog, fold_aliases};
pub use preview::{PreviewAssigner, PreviewPolicy};
pub use rank::{DEFAULT_TOP_PER_CATEGORY, select_top_tags};

use std::time::Instant;

use thiserror::Error;
use tracing::info;

use crate::domain::category::VISIBLE_CATEGORIES;
use crate::domain::{Category, Dataset, Denylist};
use crate::ingest::{IngestError, SourceKind, SourceSet, open_gzip_rows};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Tunables for one generation run. Defaults match the production game.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub categories: Vec<Category>,
    pub top_per_category: usize,
    pub denylist: Denylist,
    pub allow_gif: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            categories: VISIBLE_CATEGORIES.to_vec(),
            top_per_category: DEFAULT_TOP_PER_CATEGORY,
            denylist: Denylist::default(),
            allow_gif: false,
        }
    }
}

/// Runs the full generation pass over already-cached exports.
///
/// The pass is single-threaded streaming by construction: memory stays
/// bounded by the catalog and the asset claim map, never by the post export.
/// It runs on the blocking pool to keep the runtime responsive.
pub async fn generate(sources: SourceSet, options: GenerationOptions) -> Result<Dataset, PipelineError> {
    tokio::task::spawn_blocking(move || generate_sync(&sources, &options)).await?
}

/// Synchronous core of the generation pass; see [`generate`].
pub fn generate_sync(sources: &SourceSet, options: &GenerationOptions) -> Result<Dataset, PipelineError> {
    let begin = Instant::now();
    let mut catalog = build_catalog(
        open_gzip_rows(&sources.path(SourceKind::Tags))?,
        &options.denylist,
    );
    info!(
        tags = catalog.len(),
        elapsed_ms = begin.elapsed().as_millis() as u64,
        "parsed tags"
    );

    let begin = Instant::now();
    fold_aliases(
        open_gzip_rows(&sources.path(SourceKind::TagAliases))?,
        &mut catalog,
    );
    info!(elapsed_ms = begin.elapsed().as_millis() as u64, "parsed aliases");

    let begin = Instant::now();
    let ranked = select_top_tags(&catalog, &options.categories, options.top_per_category);
    drop(catalog);
    info!(
        ranked = ranked.len(),
        elapsed_ms = begin.elapsed().as_millis() as u64,
        "selected top tags"
    );

    let begin = Instant::now();
    let mut assigner = PreviewAssigner::new(
        ranked,
        PreviewPolicy::new(options.denylist.clone(), options.allow_gif),
    );
    assigner.observe_rows(open_gzip_rows(&sources.path(SourceKind::Posts))?);
    let tags = assigner.finish();
    info!(elapsed_ms = begin.elapsed().as_millis() as u64, "parsed posts");

    Ok(Dataset {
        generation_date: sources.export_date().to_string(),
        tags,
    })
}
