pub mod config;
pub mod logging;

pub use config::{Command, Config, ConfigError, DailyConfig, GenerateConfig};
pub use logging::LogLevel;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::daily::{self, FileChallengeStore};
use crate::ingest::SourceSet;
use crate::{VERSION, pipeline, snapshot};

pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::parse();
    logging::init(config.log_level);

    match config.command {
        Command::Generate(generate) => run_generate(generate).await?,
        Command::Daily(daily) => run_daily(daily).await?,
    }
    Ok(())
}

async fn run_generate(config: GenerateConfig) -> anyhow::Result<()> {
    let config = match &config.config_file {
        Some(path) => GenerateConfig::from_file(path)
            .with_context(|| format!("loading config file {}", path.display()))?,
        None => config,
    };

    let export_date = config.resolved_export_date()?;
    info!(version = VERSION, date = %export_date, "starting generation run");

    let sources = SourceSet::new(&config.base_url, &export_date, &config.cache_dir);
    if config.offline {
        sources
            .verify_cached()
            .context("offline mode requires cached exports")?;
    } else {
        sources.ensure_all().await.context("export retrieval failed")?;
    }

    let options = config.generation_options()?;
    let dataset = pipeline::generate(sources, options).await?;

    let json_path = config.output_dir.join("tags.json");
    let binary_path = config.output_dir.join("tags.bin");
    snapshot::write_json(&json_path, &dataset)?;
    snapshot::write_binary(&binary_path, &dataset)?;
    info!(
        tags = dataset.tags.len(),
        json = %json_path.display(),
        binary = %binary_path.display(),
        "snapshot written"
    );
    Ok(())
}

async fn run_daily(config: DailyConfig) -> anyhow::Result<()> {
    let challenge_date = config.resolved_challenge_date()?;
    let dataset = snapshot::load(&config.dataset_path)
        .with_context(|| format!("loading dataset {}", config.dataset_path.display()))?;

    let store = FileChallengeStore::new(&config.store_dir);
    let challenge =
        daily::fetch_or_generate(&store, &dataset, &challenge_date, &config.pairing_config())
            .await?;

    info!(
        date = %challenge.challenge_date,
        rounds = challenge.pairs.len(),
        "daily challenge ready"
    );
    println!("{}", serde_json::to_string_pretty(&challenge)?);
    Ok(())
}
