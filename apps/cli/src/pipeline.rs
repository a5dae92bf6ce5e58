//! Run orchestration — one project at a time: prompt → generate → parse →
//! write, with a fixed pause between generation calls.
//!
//! A failed generation call degrades that project to default content and the
//! run continues; only input loading is allowed to abort a run. The combined
//! file is checkpointed periodically so an interrupted run stays recoverable.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

use crate::generation::defaults::default_content;
use crate::generation::parser::parse_sections;
use crate::generation::profile::build_profile;
use crate::generation::prompts::build_prompt;
use crate::llm_client::TextGenerator;
use crate::models::{MarketData, ProjectRecord};
use crate::output::OutputWriter;

/// Combined-file checkpoint interval, in projects.
const CHECKPOINT_EVERY: usize = 5;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Minimum pause between consecutive generation calls.
    pub pace: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            pace: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Processes every selected project sequentially and writes the combined file
/// at the end (and at checkpoints along the way).
pub async fn run(
    generator: &dyn TextGenerator,
    projects: &[ProjectRecord],
    market_data: &HashMap<String, MarketData>,
    writer: &mut OutputWriter,
    options: &PipelineOptions,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for (i, record) in projects.iter().enumerate() {
        info!(
            "Processing project {}/{}: {} ({})",
            i + 1,
            projects.len(),
            record.name,
            record.symbol
        );

        let market = market_data
            .get(&record.symbol)
            .cloned()
            .unwrap_or_default();
        let prompt = build_prompt(record, &market);

        let (raw_text, content) = match generator.generate(&prompt).await {
            Ok(text) => {
                let content = parse_sections(&text, &record.symbol);
                summary.succeeded += 1;
                (text, content)
            }
            Err(e) => {
                error!(
                    "Generation failed for {} ({}): {e} — writing default content",
                    record.name, record.symbol
                );
                summary.failed += 1;
                (
                    format!("Error generating content: {e}"),
                    default_content(&record.symbol),
                )
            }
        };

        let profile = build_profile(record, &content, &market);
        writer.write_project(&record.symbol, &raw_text, profile)?;

        if (i + 1) % CHECKPOINT_EVERY == 0 {
            writer.write_combined()?;
            info!("Checkpointed combined file with {} projects", writer.written());
        }

        if i + 1 < projects.len() && !options.pace.is_zero() {
            tokio::time::sleep(options.pace).await;
        }
    }

    writer.write_combined()?;
    info!(
        "Run complete: {} succeeded, {} failed, {} profiles written",
        summary.succeeded,
        summary.failed,
        writer.written()
    );
    Ok(summary)
}
