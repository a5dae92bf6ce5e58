//! coinbrief — generates investor-facing research briefs for crypto projects.
//!
//! `generate` reads the benchmark score sheet and market-data snapshot, calls
//! the generation API for each selected project, and writes per-project files
//! plus a combined collection. `combine` rebuilds the combined file from
//! per-project files already on disk.

mod config;
mod generation;
mod llm_client;
mod loader;
mod models;
mod output;
mod pipeline;
mod selector;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, DEFAULT_TARGET_SYMBOLS};
use crate::llm_client::GeminiClient;
use crate::output::OutputWriter;
use crate::pipeline::PipelineOptions;

#[derive(Parser)]
#[command(name = "coinbrief", version, about = "Crypto project content generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate content for projects on the score sheet
    Generate {
        /// Path to the benchmark score sheet CSV
        #[arg(long)]
        sheet: PathBuf,

        /// Path to the market-data snapshot JSON
        #[arg(long)]
        market_data: Option<PathBuf>,

        /// Directory for generated files
        #[arg(long, default_value = "project_content")]
        output_dir: PathBuf,

        /// Comma-separated ticker symbols to process (default: full roster)
        #[arg(long, value_delimiter = ',')]
        symbols: Option<Vec<String>>,

        /// Process at most this many projects
        #[arg(long)]
        limit: Option<usize>,

        /// Seconds to pause between generation calls
        #[arg(long, default_value_t = 3)]
        pace: u64,
    },

    /// Rebuild the combined file from per-project JSON files
    Combine {
        /// Directory holding the per-project files
        #[arg(long, default_value = "project_content")]
        output_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_PKG_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            sheet,
            market_data,
            output_dir,
            symbols,
            limit,
            pace,
        } => {
            let config = Config::from_env()?;

            let records = loader::load_score_sheet(&sheet)?;
            let market = match market_data {
                Some(path) => loader::load_market_data(&path)?,
                None => HashMap::new(),
            };

            let targets: Vec<String> = symbols.unwrap_or_else(|| {
                DEFAULT_TARGET_SYMBOLS.iter().map(|s| s.to_string()).collect()
            });
            let projects = selector::select_projects(&records, &targets, limit);
            info!("Selected {} projects for generation", projects.len());

            let generator = GeminiClient::new(config.gemini_api_key);
            let mut writer = OutputWriter::new(&output_dir)?;
            let options = PipelineOptions {
                pace: Duration::from_secs(pace),
            };

            let summary =
                pipeline::run(&generator, &projects, &market, &mut writer, &options).await?;
            if summary.failed > 0 {
                info!(
                    "{} of {} projects fell back to default content",
                    summary.failed,
                    projects.len()
                );
            }
        }
        Command::Combine { output_dir } => {
            let count = output::rebuild_combined(&output_dir)?;
            info!("Combined {count} project files");
        }
    }

    Ok(())
}
